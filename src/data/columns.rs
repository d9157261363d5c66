use std::fmt;

/// Display name of the synthetic row-index column.
pub const INDEX_LABEL: &str = "Sample";

/// What a series uses for its x values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum XColumn {
    /// Synthetic row index of the log.
    Index,
    Named(String),
}

impl XColumn {
    pub fn axis_label(&self) -> &str {
        match self {
            XColumn::Index => INDEX_LABEL,
            XColumn::Named(name) => name,
        }
    }
}

/// A resolved (x, y) column pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnPair {
    pub x: XColumn,
    pub y: String,
}

impl ColumnPair {
    pub fn index(y: impl Into<String>) -> Self {
        Self {
            x: XColumn::Index,
            y: y.into(),
        }
    }

    pub fn named(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: XColumn::Named(x.into()),
            y: y.into(),
        }
    }

    pub fn label(&self) -> String {
        match &self.x {
            XColumn::Index => self.y.clone(),
            XColumn::Named(x) => format!("{x} vs. {}", self.y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    UnknownColumn(String),
    MismatchedCounts { x: usize, y: usize },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::UnknownColumn(sel) => write!(f, "Cannot find column {sel}"),
            ResolveWarning::MismatchedCounts { x, y } => write!(
                f,
                "Number of x-cols ({x}) must match the number of y-cols ({y}), ignoring x-cols"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub pairs: Vec<ColumnPair>,
    pub warnings: Vec<ResolveWarning>,
}

impl Resolution {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }

    /// Deduplicated x-axis labels, in pair order.
    pub fn x_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for pair in &self.pairs {
            let label = pair.x.axis_label();
            if !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        labels
    }
}

/// Resolve one selector: exact name first, then a positional index
/// (negative counts from the end).
pub fn resolve_selector(columns: &[String], selector: &str) -> Option<String> {
    if let Some(col) = columns.iter().find(|c| c.as_str() == selector) {
        return Some(col.clone());
    }
    let idx: i64 = selector.trim().parse().ok()?;
    let len = columns.len() as i64;
    let idx = if idx < 0 { idx + len } else { idx };
    if (0..len).contains(&idx) {
        Some(columns[idx as usize].clone())
    } else {
        None
    }
}

fn resolve_list(
    columns: &[String],
    selectors: Option<&[String]>,
    warnings: &mut Vec<ResolveWarning>,
) -> Option<Vec<String>> {
    let resolved: Vec<String> = selectors?
        .iter()
        .filter_map(|sel| {
            let col = resolve_selector(columns, sel);
            if col.is_none() {
                warnings.push(ResolveWarning::UnknownColumn(sel.clone()));
            }
            col
        })
        .collect();
    (!resolved.is_empty()).then_some(resolved)
}

/// Map x/y selectors onto the current column set and pair them up.
///
/// Missing x selectors fall back to the row index, missing y selectors to
/// every column. Several x columns must match the y count one-to-one,
/// otherwise they are dropped in favour of the index. A single x column is
/// shared by all y columns.
pub fn resolve_columns(
    columns: &[String],
    x_selectors: Option<&[String]>,
    y_selectors: Option<&[String]>,
) -> Resolution {
    let mut warnings = Vec::new();
    let mut x_cols = resolve_list(columns, x_selectors, &mut warnings);
    let y_cols = resolve_list(columns, y_selectors, &mut warnings);

    let mismatch = match (&x_cols, &y_cols) {
        (Some(xs), Some(ys)) if xs.len() > 1 && xs.len() != ys.len() => Some((xs.len(), ys.len())),
        _ => None,
    };
    if let Some((x, y)) = mismatch {
        warnings.push(ResolveWarning::MismatchedCounts { x, y });
        x_cols = None;
    }

    let x_cols: Vec<XColumn> = match x_cols {
        Some(xs) => xs.into_iter().map(XColumn::Named).collect(),
        None => vec![XColumn::Index],
    };
    let y_cols = y_cols.unwrap_or_else(|| columns.to_vec());

    // Several x columns only survive with a matching y count, and an empty
    // y list means the table itself has no columns.
    if x_cols.len() > 1 && x_cols.len() != y_cols.len() {
        warnings.push(ResolveWarning::MismatchedCounts {
            x: x_cols.len(),
            y: y_cols.len(),
        });
        let pairs = y_cols.into_iter().map(ColumnPair::index).collect();
        return Resolution { pairs, warnings };
    }

    let pairs = x_cols
        .iter()
        .cycle()
        .zip(y_cols)
        .map(|(x, y)| ColumnPair { x: x.clone(), y })
        .collect();

    Resolution { pairs, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selector_by_name_then_index() {
        let columns = cols(&["a", "b", "7"]);
        assert_eq!(resolve_selector(&columns, "b").as_deref(), Some("b"));
        assert_eq!(resolve_selector(&columns, "0").as_deref(), Some("a"));
        // A column literally named "7" wins over position 7.
        assert_eq!(resolve_selector(&columns, "7").as_deref(), Some("7"));
        assert_eq!(resolve_selector(&columns, "-1").as_deref(), Some("7"));
        assert_eq!(resolve_selector(&columns, "3"), None);
        assert_eq!(resolve_selector(&columns, "-4"), None);
        assert_eq!(resolve_selector(&columns, "z"), None);
    }

    #[test]
    fn unknown_y_selector_is_dropped_with_warning() {
        let columns = cols(&["a", "b"]);
        let res = resolve_columns(&columns, None, Some(cols(&["b", "z"]).as_slice()));
        assert_eq!(res.pairs, vec![ColumnPair::index("b")]);
        assert_eq!(res.warnings, vec![ResolveWarning::UnknownColumn("z".into())]);
    }

    #[test]
    fn mismatched_x_falls_back_to_index() {
        let columns = cols(&["a", "b", "c"]);
        let (x, y) = (cols(&["a", "c"]), cols(&["b"]));
        let res = resolve_columns(&columns, Some(x.as_slice()), Some(y.as_slice()));
        assert_eq!(res.pairs, vec![ColumnPair::index("b")]);
        assert_eq!(
            res.warnings,
            vec![ResolveWarning::MismatchedCounts { x: 2, y: 1 }]
        );
    }

    #[test]
    fn single_x_is_cycled_over_y() {
        let columns = cols(&["idx", "b", "c"]);
        let (x, y) = (cols(&["idx"]), cols(&["b", "c"]));
        let res = resolve_columns(&columns, Some(x.as_slice()), Some(y.as_slice()));
        assert_eq!(
            res.pairs,
            vec![ColumnPair::named("idx", "b"), ColumnPair::named("idx", "c")]
        );
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn matching_x_and_y_pair_one_to_one() {
        let columns = cols(&["t1", "v1", "t2", "v2"]);
        let res = resolve_columns(
            &columns,
            Some(cols(&["t1", "2"]).as_slice()),
            Some(cols(&["v1", "v2"]).as_slice()),
        );
        assert_eq!(
            res.pairs,
            vec![ColumnPair::named("t1", "v1"), ColumnPair::named("t2", "v2")]
        );
    }

    #[test]
    fn defaults_to_index_against_all_columns() {
        let columns = cols(&["a", "b"]);
        let res = resolve_columns(&columns, None, None);
        assert_eq!(res.pairs, vec![ColumnPair::index("a"), ColumnPair::index("b")]);
        assert_eq!(res.x_labels(), vec![INDEX_LABEL.to_string()]);
    }

    #[test]
    fn x_list_against_default_y_must_match_all_columns() {
        let columns = cols(&["a", "b", "c"]);
        let res = resolve_columns(&columns, Some(cols(&["a", "b"]).as_slice()), None);
        assert_eq!(res.pairs.len(), 3);
        assert!(res.pairs.iter().all(|p| p.x == XColumn::Index));
        assert_eq!(res.warnings.len(), 1);
    }

    #[test]
    fn unresolvable_x_list_counts_as_absent() {
        let columns = cols(&["a", "b"]);
        let (x, y) = (cols(&["nope"]), cols(&["b"]));
        let res = resolve_columns(&columns, Some(x.as_slice()), Some(y.as_slice()));
        assert_eq!(res.pairs, vec![ColumnPair::index("b")]);
        assert_eq!(res.warnings, vec![ResolveWarning::UnknownColumn("nope".into())]);
    }

    #[test]
    fn labels() {
        assert_eq!(ColumnPair::index("b").label(), "b");
        assert_eq!(ColumnPair::named("a", "b").label(), "a vs. b");
        let res = Resolution {
            pairs: vec![
                ColumnPair::named("a", "b"),
                ColumnPair::named("a", "c"),
                ColumnPair::index("d"),
            ],
            warnings: Vec::new(),
        };
        assert_eq!(res.x_labels(), vec!["a".to_string(), INDEX_LABEL.to_string()]);
    }
}
