use comfy_table::{Cell, ContentArrangement};
use stencil_template::LabelSelector;

pub trait LabelSelectorExt {
    /// Renders one row per entry, duplicates included, in editing order.
    fn render_table(&self) -> String;
}

impl LabelSelectorExt for LabelSelector {
    fn render_table(&self) -> String {
        let rows = self
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| [Cell::new(index), Cell::new(&entry.key), Cell::new(&entry.value)])
            .collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "KEY", "VALUE"])
            .add_rows(rows)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_duplicates() {
        let selector: LabelSelector = [("app", "app1"), ("app", "app2")].into_iter().collect();
        let table = selector.render_table();

        assert!(table.contains("KEY"));
        assert!(table.contains("app1"));
        assert!(table.contains("app2"));
    }
}
