use super::Currency;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Account fields the API attaches to responses.
///
/// Each field keeps the last value seen; a response that omits a field leaves
/// it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Account {
    pub user_id: Option<u64>,
    pub balance: Option<Decimal>,
    pub currency: Option<Currency>,
    /// Server-local time of the last account change (`date_mod`).
    pub date_mod: Option<NaiveDateTime>,
}

impl Account {
    pub(crate) fn merge(&mut self, update: Account) {
        if update.user_id.is_some() {
            self.user_id = update.user_id;
        }
        if update.balance.is_some() {
            self.balance = update.balance;
        }
        if update.currency.is_some() {
            self.currency = update.currency;
        }
        if update.date_mod.is_some() {
            self.date_mod = update.date_mod;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
