use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::EconomicLoss;
use crate::shared::listing::{FieldValue, Listable};

/// Conflict region with its severity and economic loss figures
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: Uuid,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// 1 (minor) to 10 (catastrophic)
    pub severity_level: i32,
    pub housing_loss: f64,
    pub income_loss: f64,
    pub assets_loss: f64,
    pub total_loss: f64,
    pub predicted_loss: f64,
    pub description: String,
    pub last_updated: DateTime<Utc>,
}

impl Region {
    pub fn economic_loss(&self) -> EconomicLoss {
        EconomicLoss {
            housing: self.housing_loss,
            income: self.income_loss,
            assets: self.assets_loss,
            total: self.total_loss,
        }
    }
}

impl Listable for Region {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(Cow::Borrowed(&self.name))),
            "description" => Some(FieldValue::Text(Cow::Borrowed(&self.description))),
            "severity_level" => Some(FieldValue::Number(f64::from(self.severity_level))),
            "total_loss" => Some(FieldValue::Number(self.total_loss)),
            "predicted_loss" => Some(FieldValue::Number(self.predicted_loss)),
            _ => None,
        }
    }
}
