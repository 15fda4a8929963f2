//! `expertdesk personas`

use expertdesk_personas::descriptors;

use crate::terminal_output::{render_table, Column};

pub fn render() -> String {
    let columns = [
        Column::left(""),
        Column::left("Persona"),
        Column::left("Slug"),
        Column::left("Description"),
    ];
    let rows: Vec<Vec<String>> = descriptors()
        .iter()
        .map(|d| {
            vec![
                d.icon.to_string(),
                d.id.to_string(),
                d.slug.to_string(),
                d.short_description.to_string(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

pub fn run() {
    print!("{}", render());
}

#[cfg(test)]
mod tests {
    use crate::terminal_output::{display_width, strip_ansi};

    use super::*;

    #[test]
    fn lists_personas_in_order() {
        let table = strip_ansi(&render());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[2].contains("健康アドバイザー"));
        assert!(lines[3].contains("recipe"));
        assert!(lines[4].contains("💻"));
        assert!(lines[5].contains("旅行計画"));
    }

    #[test]
    fn icon_column_is_aligned() {
        let table = strip_ansi(&render());
        let offsets: Vec<usize> = table
            .lines()
            .skip(2)
            .zip(descriptors())
            .map(|(line, d)| display_width(line.split(d.id).next().unwrap()))
            .collect();
        assert_eq!(offsets, vec![6; 4]);
    }
}
