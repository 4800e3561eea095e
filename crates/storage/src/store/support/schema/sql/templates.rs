#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS templates (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          description TEXT NOT NULL,
          long_description TEXT,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          modified_by TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS steps (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          template_id INTEGER NOT NULL,
          text TEXT NOT NULL,
          order_index INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          modified_by TEXT NOT NULL,
          FOREIGN KEY(template_id) REFERENCES templates(id) ON DELETE RESTRICT,
          UNIQUE(template_id, order_index),
          CHECK(order_index >= 0)
        );

        CREATE TABLE IF NOT EXISTS step_references (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          step_id INTEGER NOT NULL,
          url TEXT NOT NULL,
          reference_type_id INTEGER NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          modified_by TEXT NOT NULL,
          FOREIGN KEY(step_id) REFERENCES steps(id) ON DELETE RESTRICT,
          FOREIGN KEY(reference_type_id) REFERENCES reference_types(id) ON DELETE RESTRICT
        );
"#;
