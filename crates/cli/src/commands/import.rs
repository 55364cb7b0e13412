// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline tracker import: program rules, then conversion for persistence.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

use sanitas_core::programrule::{EntityIssues, IssueType, RuleEngineReport};
use sanitas_core::tracker::converter::{
    EnrollmentConverter, EventConverter, RelationshipConverter, TrackerConverter,
};
use sanitas_core::tracker::domain::TrackerPayload;
use sanitas_core::tracker::{model, PreheatSnapshot, TrackerType};
use sanitas_core::{ProgramRuleEngine, RuleEffects, TrackerBundle, TrackerImportStrategy, TrackerPreheat};

use crate::cli::StrategyArg;
use crate::config::Config;
use crate::error::Result;
use crate::fixtures::{self, read_json};

impl From<StrategyArg> for TrackerImportStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Create => TrackerImportStrategy::Create,
            StrategyArg::Update => TrackerImportStrategy::Update,
            StrategyArg::CreateAndUpdate => TrackerImportStrategy::CreateAndUpdate,
            StrategyArg::Delete => TrackerImportStrategy::Delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub ignored: usize,
}

impl ImportStats {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.deleted + self.ignored
    }
}

/// An entity that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityError {
    pub tracker_type: TrackerType,
    pub uid: String,
    pub message: String,
}

/// Entities ready to be persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertedEntities {
    pub enrollments: Vec<model::Enrollment>,
    pub events: Vec<model::Event>,
    pub relationships: Vec<model::Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub status: ImportStatus,
    pub import_strategy: TrackerImportStrategy,
    pub stats: ImportStats,
    pub errors: Vec<EntityError>,
    pub rule_issues: Vec<EntityIssues>,
    pub rejected: BTreeSet<String>,
    pub entities: ConvertedEntities,
}

pub fn run(
    config: &Config,
    preheat: &Path,
    payload: &Path,
    effects: Option<&Path>,
    strategy: StrategyArg,
) -> Result<()> {
    let snapshot: PreheatSnapshot = read_json(preheat)?;
    let payload: TrackerPayload = read_json(payload)?;
    let effects: Vec<RuleEffects> = effects.map(read_json).transpose()?.unwrap_or_default();

    let preheat = TrackerPreheat::from_snapshot(snapshot, config.id_schemes());
    let bundle = TrackerBundle::new(preheat, payload, strategy.into());
    let report = import(config, bundle, &effects);
    fixtures::print_json(&report)
}

/// Applies rule effects to the bundle, then converts every entity that
/// was not rejected.
pub(crate) fn import(config: &Config, mut bundle: TrackerBundle, effects: &[RuleEffects]) -> ImportReport {
    let rules = ProgramRuleEngine::new(config.settings).execute(&mut bundle, effects);

    let mut importer = Importer {
        bundle: &bundle,
        rules: &rules,
        stats: ImportStats::default(),
        errors: Vec::new(),
    };
    let entities = ConvertedEntities {
        enrollments: importer.convert(
            &EnrollmentConverter::new(),
            TrackerType::Enrollment,
            &bundle.enrollments,
            |e| &e.enrollment,
        ),
        events: importer.convert(&EventConverter::new(), TrackerType::Event, &bundle.events, |e| {
            &e.event
        }),
        relationships: importer.convert(
            &RelationshipConverter::new(),
            TrackerType::Relationship,
            &bundle.relationships,
            |r| &r.relationship,
        ),
    };
    let Importer { stats, errors, .. } = importer;

    let status = if !errors.is_empty() || !rules.rejected.is_empty() {
        ImportStatus::Error
    } else if rules.count(IssueType::Warning) > 0 {
        ImportStatus::Warning
    } else {
        ImportStatus::Ok
    };
    info!(
        status = ?status,
        created = stats.created,
        updated = stats.updated,
        deleted = stats.deleted,
        ignored = stats.ignored,
        "import finished"
    );

    ImportReport {
        status,
        import_strategy: bundle.import_strategy,
        stats,
        errors,
        rule_issues: rules.entities,
        rejected: rules.rejected,
        entities,
    }
}

struct Importer<'a> {
    bundle: &'a TrackerBundle,
    rules: &'a RuleEngineReport,
    stats: ImportStats,
    errors: Vec<EntityError>,
}

impl Importer<'_> {
    fn convert<T: TrackerConverter>(
        &mut self,
        converter: &T,
        tracker_type: TrackerType,
        wires: &[T::Wire],
        uid_of: impl Fn(&T::Wire) -> &String,
    ) -> Vec<T::Model> {
        let mut converted = Vec::new();
        for wire in wires {
            let uid = uid_of(wire).as_str();
            if self.rules.is_rejected(uid) {
                debug!(%tracker_type, uid, "rejected by program rules");
                self.stats.ignored += 1;
                continue;
            }

            let exists = self.bundle.preheat.exists(tracker_type, uid);
            let strategy = self.bundle.strategy(tracker_type, uid);
            let conflict = match strategy {
                TrackerImportStrategy::Create if exists => Some("already exists"),
                TrackerImportStrategy::Update | TrackerImportStrategy::Delete if !exists => {
                    Some("does not exist")
                }
                _ => None,
            };
            if let Some(reason) = conflict {
                self.fail(tracker_type, uid, format!("{tracker_type} {uid} {reason}"));
                continue;
            }
            if strategy.is_delete() {
                self.stats.deleted += 1;
                continue;
            }

            match converter.from_wire(&self.bundle.preheat, wire) {
                Ok(model) => {
                    if strategy.is_update() {
                        self.stats.updated += 1;
                    } else {
                        self.stats.created += 1;
                    }
                    converted.push(model);
                }
                Err(e) => self.fail(tracker_type, uid, e.to_string()),
            }
        }
        converted
    }

    fn fail(&mut self, tracker_type: TrackerType, uid: &str, message: String) {
        warn!(%tracker_type, uid, "{message}");
        self.stats.ignored += 1;
        self.errors.push(EntityError {
            tracker_type,
            uid: uid.to_string(),
            message,
        });
    }
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
