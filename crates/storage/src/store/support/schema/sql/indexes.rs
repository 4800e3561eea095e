#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_steps_template_order
          ON steps(template_id, order_index);

        CREATE INDEX IF NOT EXISTS idx_step_references_step
          ON step_references(step_id, id);

        CREATE INDEX IF NOT EXISTS idx_instances_template_status
          ON instances(template_id, status, created_at_ms);

        CREATE INDEX IF NOT EXISTS idx_instance_steps_instance
          ON instance_steps(instance_id, step_id);

        CREATE INDEX IF NOT EXISTS idx_events_entity
          ON events(entity_kind, entity_id, seq);
"#;
