use serde::{Deserialize, Serialize};

use super::lenient;
use crate::patch::{overwrite, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    /// `dd-MM-yyyy` by convention; stored as given.
    pub date: String,
    pub amount: f64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub amount: f64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Entity for Transaction {
    const KIND: &'static str = "Transaction";
    type Draft = NewTransaction;
    type Patch = TransactionPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: NewTransaction) -> Self {
        Self { id, date: d.date, amount: d.amount, status: d.status }
    }

    fn apply(&mut self, p: TransactionPatch) {
        overwrite(&mut self.date, p.date);
        overwrite(&mut self.amount, p.amount);
        overwrite(&mut self.status, p.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::merge;

    #[test]
    fn status_patch_updates_status() {
        let stored = Transaction { id: 5, date: "01-02-2025".into(), amount: 1500.0, status: "pending".into() };
        let patch = TransactionPatch { status: Some("paid".into()), ..Default::default() };
        let merged = merge(stored, patch);
        assert_eq!(merged.status, "paid");
        assert_eq!(merged.amount, 1500.0);
        assert_eq!(merged.date, "01-02-2025");
    }
}
