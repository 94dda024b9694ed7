//! Terminal output helpers shared by the subcommands.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use shop_model::PageToken;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a pagination window as a single line, e.g. `1 ... 9 10 11 ... 20`.
pub fn render_tokens(tokens: &[PageToken]) -> String {
    if tokens.is_empty() {
        return "(no pages)".to_string();
    }
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tokens() {
        let tokens = [
            PageToken::Page(1),
            PageToken::Ellipsis,
            PageToken::Page(9),
            PageToken::Page(10),
        ];
        assert_eq!(render_tokens(&tokens), "1 ... 9 10");
        assert_eq!(render_tokens(&[]), "(no pages)");
    }
}
