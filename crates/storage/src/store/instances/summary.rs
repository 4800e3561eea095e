#![forbid(unsafe_code)]

use super::super::references::references_for_step_tx;
use super::status::rollup_tx;
use super::*;
use chk_core::dates::{is_due_within, parse_target_date};
use chk_core::ids::record_id;
use rusqlite::params;
use std::collections::{BTreeMap, HashMap};

impl SqliteStore {
    /// Overview of the instances whose stored status is not Completed.
    ///
    /// Counts come from the stored statuses as they are; nothing is
    /// re-derived or written, so call `instance_apply_status` first when the
    /// summary should reflect the latest step changes.
    pub fn instances_summary(&self, days_due: u32) -> Result<InstanceSummary, StoreError> {
        let tx = self.read_tx()?;
        let active = {
            let mut stmt = tx.prepare(&format!(
                "SELECT {INSTANCE_COLUMNS} FROM instances WHERE status <> ?1 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![Status::Completed.as_str()], instance_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let today = today_utc();
        let mut by_status: BTreeMap<Status, usize> = BTreeMap::new();
        let mut percentage_sum = 0.0;
        let mut due_soon = Vec::new();
        for instance in &active {
            *by_status.entry(instance.status).or_insert(0) += 1;
            percentage_sum += rollup_tx(&tx, instance.id)?.percentage;

            let Some(raw) = instance.target_date.as_deref() else {
                continue;
            };
            match parse_target_date(raw) {
                Ok(date) if is_due_within(date, today, days_due) => {
                    due_soon.push((date, instance.clone()));
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(instance_id = instance.id, error = %err, "unreadable target date");
                }
            }
        }
        due_soon.sort_by(|(a_date, a), (b_date, b)| a_date.cmp(b_date).then(a.id.cmp(&b.id)));

        let completion_rate = if active.is_empty() {
            0.0
        } else {
            percentage_sum / active.len() as f64
        };

        Ok(InstanceSummary {
            active_count: active.len(),
            due_soon: due_soon.into_iter().map(|(_, instance)| instance).collect(),
            by_status,
            completion_rate,
        })
    }

    /// An instance with its rollup and every step state, joined to the
    /// template's step text and the step's references where the step still
    /// exists.
    pub fn instance_details(&self, instance_id: i64) -> Result<InstanceDetails, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let tx = self.read_tx()?;
        let instance = instance_row_tx(&tx, instance_id)?;
        let rollup = rollup_tx(&tx, instance_id)?;

        let live: HashMap<i64, StepRow> = if template_exists_tx(&tx, instance.template_id)? {
            template_steps_tx(&tx, instance.template_id)?
                .into_iter()
                .map(|step| (step.id, step))
                .collect()
        } else {
            HashMap::new()
        };

        let mut steps = Vec::new();
        for state in step_states_tx(&tx, instance_id)? {
            let detail = match live.get(&state.step_id) {
                Some(step) => InstanceStepDetail {
                    text: Some(step.text.clone()),
                    order_index: Some(step.order_index),
                    references: references_for_step_tx(&tx, step.id)?,
                    state,
                },
                None => InstanceStepDetail {
                    state,
                    text: None,
                    order_index: None,
                    references: Vec::new(),
                },
            };
            steps.push(detail);
        }
        // Stable sort keeps orphans (no index) after live steps, in creation order.
        steps.sort_by_key(|detail| detail.order_index.unwrap_or(i64::MAX));

        Ok(InstanceDetails {
            instance,
            rollup,
            steps,
        })
    }
}
