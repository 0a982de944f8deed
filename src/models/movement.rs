//! Custody movement model and the status-transition table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::equipment::EquipmentStatus;

/// Kind of custody event. Stored in the DB as the snake_case text code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum MovementType {
    CheckIn,
    CheckOut,
    Transfer,
    Return,
}

impl MovementType {
    /// Return the stored string code for this movement type
    pub fn as_code(&self) -> &'static str {
        match self {
            MovementType::CheckIn => "check_in",
            MovementType::CheckOut => "check_out",
            MovementType::Transfer => "transfer",
            MovementType::Return => "return",
        }
    }

    /// Equipment status implied by recording this movement.
    ///
    /// Check-ins record intake on stock that is already in storage, and
    /// transfers only move custody between departments; neither touches
    /// availability.
    pub fn resulting_status(&self) -> Option<EquipmentStatus> {
        match self {
            MovementType::CheckOut => Some(EquipmentStatus::InUse),
            MovementType::Return => Some(EquipmentStatus::InStorage),
            MovementType::CheckIn | MovementType::Transfer => None,
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Custody movement record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movement {
    pub id: i32,
    pub equipment_id: i32,
    pub movement_type: MovementType,
    pub moved_at: DateTime<Utc>,
    /// Person taking or holding custody
    pub user_name: Option<String>,
    pub user_staff_id: Option<String>,
    pub department: Option<String>,
    /// Room / building
    pub location: Option<String>,
    pub description: Option<String>,
    /// Staff member who processed the movement
    pub handled_by: Option<String>,
    /// Manager who approved it
    pub approved_by: Option<String>,
}

/// Record movement request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMovement {
    pub equipment_id: i32,
    pub movement_type: MovementType,
    /// ISO-8601 date-time, trailing `Z` accepted; defaults to now
    pub moved_at: Option<String>,
    pub user_name: Option<String>,
    pub user_staff_id: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub handled_by: Option<String>,
    pub approved_by: Option<String>,
}

/// Movement listing filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MovementQuery {
    /// Restrict to one equipment item
    pub equipment_id: Option<i32>,
}
