// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sanitas-core: access control and tracker import logic
//!
//! This crate provides the sharing model and ACL decisions, the tracker
//! import converters, the program rule engine and program notification
//! scheduling used by the sanitas CLI.

pub mod access_string;
pub mod acl;
pub mod error;
pub mod feedback;
pub mod notification;
pub mod programrule;
pub mod schema;
pub mod settings;
pub mod sharing;
pub mod tracker;

pub use access_string::{AccessString, Permission};
pub use acl::{Access, AccessData, AclService};
pub use error::{Error, Result};
pub use feedback::{ErrorCode, ErrorReport};
pub use notification::{NotificationTemplate, NotificationTrigger, ProgramNotificationRecipient};
pub use programrule::{ProgramRuleEngine, ProgramRuleIssue, RuleEffects, RuleEngineReport};
pub use schema::{AuthorityType, Schema, SchemaRegistry, SchemaService};
pub use settings::SystemSettings;
pub use sharing::{Shareable, SharedObject, Sharing, User};
pub use tracker::{TrackerBundle, TrackerImportStrategy, TrackerPreheat};
