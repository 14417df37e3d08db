//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Fixtures are consistent and
//! predictable; use `fake`-backed helpers when variety matters more than
//! predictability.

use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::Money;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical single-order amount
    pub fn order_total() -> Money {
        Money::new(dec!(360.00))
    }

    /// A typical partial payment
    pub fn partial_payment() -> Money {
        Money::new(dec!(200.00))
    }

    /// Opening supplier debt carried into the system
    pub fn opening_debt() -> Money {
        Money::new(dec!(1000.00))
    }

    /// An amount with sub-paisa precision, for rejection tests
    pub fn three_decimals() -> rust_decimal::Decimal {
        dec!(10.005)
    }
}

/// Fixture for names and contact details
pub struct NameFixtures;

impl NameFixtures {
    /// A random person name for retail customers
    pub fn customer_name() -> String {
        Name().fake()
    }

    /// A random business name for hotels and suppliers
    pub fn business_name() -> String {
        CompanyName().fake()
    }

    /// A random contact phone
    pub fn phone() -> String {
        PhoneNumber().fake()
    }
}
