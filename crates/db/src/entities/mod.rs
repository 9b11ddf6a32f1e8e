//! `SeaORM` entity definitions.

pub mod accounts;
pub mod parties;
pub mod sea_orm_active_enums;
