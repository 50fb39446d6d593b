use crate::model::TodoItem;

/// One line per todo: `<id>  <text>`
pub fn format_items(items: &[TodoItem]) -> String {
    if items.is_empty() {
        return "(no todos)".to_string();
    }
    items
        .iter()
        .map(|item| format!("{}  {}", item.id, item.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn items_to_json(items: &[TodoItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}
