//! Minimal ASCII table renderer, used by [`crate::dfa::Dfa::to_table`] and
//! [`crate::nfa::Nfa::to_table`] to produce a re-parseable, human-readable dump.

pub(crate) struct Table {
    col_widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn new() -> Self {
        Self {
            col_widths: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<String>) {
        if self.col_widths.len() < row.len() {
            self.col_widths.resize(row.len(), 0);
        }
        for (w, cell) in self.col_widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
        self.rows.push(row);
    }

    pub(crate) fn render(&self, sep: &str) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let mut cells = Vec::with_capacity(row.len());
            for (i, cell) in row.iter().enumerate() {
                let width = self.col_widths[i];
                let pad = width.saturating_sub(cell.chars().count());
                cells.push(format!("{}{}", " ".repeat(pad), cell));
            }
            out.push_str(&cells.join(sep));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_to_widest_cell() {
        let mut t = Table::new();
        t.push_row(vec!["a".into(), "bb".into()]);
        t.push_row(vec!["ccc".into(), "d".into()]);
        assert_eq!(t.render(" "), "  a bb\nccc  d\n");
    }
}
