#![forbid(unsafe_code)]

// `template_id` and `step_id` are deliberately not foreign keys: instances
// outlive template edits and deletions, and the auditor reconciles them.
pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS instances (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          template_id INTEGER NOT NULL,
          name TEXT NOT NULL,
          description TEXT,
          status TEXT NOT NULL DEFAULT 'Not Started',
          target_date TEXT,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          modified_by TEXT NOT NULL,
          CHECK(status IN ('Not Started', 'In Progress', 'Completed'))
        );

        CREATE TABLE IF NOT EXISTS instance_steps (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          instance_id INTEGER NOT NULL,
          step_id INTEGER NOT NULL,
          status TEXT NOT NULL DEFAULT 'Not Started',
          note TEXT,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          modified_by TEXT NOT NULL,
          FOREIGN KEY(instance_id) REFERENCES instances(id) ON DELETE RESTRICT,
          CHECK(status IN ('Not Started', 'In Progress', 'Completed'))
        );
"#;
