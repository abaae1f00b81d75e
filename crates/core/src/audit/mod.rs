//! Audit module - PR scoring, audit report models, and the audit service.
//!
//! The scoring function is pure; everything that touches a collaborator
//! (registry, production store, irradiance, ledger) lives in [`AuditService`].

mod audit_model;
mod audit_service;
mod audit_traits;
mod scoring;


pub use audit_model::{
    AuditFlag, BatchAuditReport, ComplianceSummary, DailyAudit, DailyAuditResult, PenaltyEvent,
    PenaltySummary, PublishedAudit, Verdict,
};
pub use audit_service::AuditService;
pub use audit_traits::AuditServiceTrait;
pub use scoring::{
    score, Score, HOURS_PER_DAY, MAX_PR_ALLOWED, MIN_GHI_THRESHOLD, SYSTEM_EFFICIENCY,
};
