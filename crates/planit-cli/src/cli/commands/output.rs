//! Table rendering for listings.

use comfy_table::{ContentArrangement, Table};
use planit_core::api::{Event, Task};

pub fn task_table(tasks: &[Task]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Done", "Title", "Description"]);

    for task in tasks {
        table.add_row(vec![
            task.id.to_string(),
            if task.is_done { "✓" } else { " " }.to_string(),
            task.title.clone(),
            task.description.clone(),
        ]);
    }

    table.to_string()
}

pub fn event_table(events: &[Event]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Date", "Title"]);

    for event in events {
        table.add_row(vec![event.id.to_string(), event.date.clone(), event.title.clone()]);
    }

    table.to_string()
}
