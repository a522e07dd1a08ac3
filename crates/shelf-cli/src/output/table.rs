//! Plain-text tables for catalog and ledger rows.
//!
//! Column behaviour is keyed on the field name (the last segment of a dotted
//! key such as `book.copies`): counts and ids align right, free text such as
//! titles and borrower names gives up width first on a narrow terminal.

#[derive(Clone, Copy, Debug)]
pub struct TableStyle {
    pub max_width: Option<usize>,
    pub color: bool,
}

const GAP: &str = "  ";
const ELLIPSIS: char = '…';

/// Fields holding numbers.
const NUMERIC_FIELDS: &[&str] = &["id", "book_id", "copies", "average_rating", "rating"];

/// Fields that may be cut short to fit the terminal.
const TEXT_FIELDS: &[&str] = &[
    "title",
    "author",
    "borrower_name",
    "categories",
    "name",
    "value",
];

fn field(header: &str) -> &str {
    header.rsplit('.').next().unwrap_or(header)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    /// No copies left on the shelf.
    Empty,
    /// Loan still out.
    Open,
    /// Book has been rated.
    Rated,
}

impl Tone {
    fn of(header: &str, value: &str) -> Option<Self> {
        match (field(header), value) {
            ("copies", "0") => Some(Self::Empty),
            ("returned_at", "-") => Some(Self::Open),
            ("average_rating", "0" | "0.0") => None,
            ("average_rating", _) => Some(Self::Rated),
            _ => None,
        }
    }

    const fn ansi(self) -> &'static str {
        match self {
            Self::Empty => "31",
            Self::Open => "33",
            Self::Rated => "32",
        }
    }
}

struct Column<'a> {
    header: &'a str,
    width: usize,
    numeric: bool,
    shrinkable: bool,
}

impl<'a> Column<'a> {
    fn new(header: &'a str, index: usize, rows: &[Vec<String>]) -> Self {
        let widest_cell = rows
            .iter()
            .filter_map(|row| row.get(index))
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);
        let name = field(header);
        Self {
            header,
            width: widest_cell.max(header.chars().count()),
            numeric: NUMERIC_FIELDS.contains(&name),
            shrinkable: TEXT_FIELDS.contains(&name),
        }
    }

    fn floor(&self) -> usize {
        self.header.chars().count()
    }

    fn cell(&self, value: &str, color: bool) -> String {
        let text = ellipsize(value, self.width);
        let padded = if self.numeric {
            format!("{text:>width$}", width = self.width)
        } else {
            format!("{text:<width$}", width = self.width)
        };
        match Tone::of(self.header, value).filter(|_| color) {
            Some(tone) => format!("\u{1b}[{}m{padded}\u{1b}[0m", tone.ansi()),
            None => padded,
        }
    }
}

/// Render rows under the given headers, one line per row.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], style: TableStyle) -> String {
    let mut columns: Vec<Column<'_>> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| Column::new(header, index, rows))
        .collect();
    if let Some(max_width) = style.max_width {
        shrink_to(&mut columns, max_width);
    }

    let header_line = columns
        .iter()
        .map(|column| column.cell(column.header, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let total = columns.iter().map(|column| column.width).sum::<usize>()
        + GAP.len() * columns.len().saturating_sub(1);

    let mut lines = vec![header_line, "-".repeat(total)];
    lines.extend(rows.iter().map(|row| {
        columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                column.cell(row.get(index).map_or("-", String::as_str), style.color)
            })
            .collect::<Vec<_>>()
            .join(GAP)
    }));
    lines.join("\n")
}

/// Narrow text columns, widest first, until the table fits in `max_width`.
/// Ids, counts, and timestamps keep their full width.
fn shrink_to(columns: &mut [Column<'_>], max_width: usize) {
    let gaps = GAP.len() * columns.len().saturating_sub(1);
    let mut excess = (columns.iter().map(|c| c.width).sum::<usize>() + gaps)
        .saturating_sub(max_width);

    while excess > 0 {
        let Some(widest) = columns
            .iter_mut()
            .filter(|c| c.shrinkable && c.width > c.floor())
            .max_by_key(|c| c.width)
        else {
            break;
        };
        let cut = excess.min(widest.width - widest.floor());
        // At most half a column per round; the rest falls on the next widest.
        let cut = cut.min((widest.width - widest.floor()).div_ceil(2));
        widest.width -= cut;
        excess -= cut;
    }
}

fn ellipsize(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain(max_width: Option<usize>) -> TableStyle {
        TableStyle {
            max_width,
            color: false,
        }
    }

    #[test]
    fn tones_follow_catalog_fields() {
        assert_eq!(Tone::of("copies", "0"), Some(Tone::Empty));
        assert_eq!(Tone::of("book.copies", "0"), Some(Tone::Empty));
        assert_eq!(Tone::of("returned_at", "-"), Some(Tone::Open));
        assert_eq!(Tone::of("average_rating", "8.5"), Some(Tone::Rated));
        assert_eq!(Tone::of("average_rating", "0.0"), None);
        assert_eq!(Tone::of("copies", "3"), None);
    }

    #[test]
    fn counts_align_right_and_text_left() {
        let rows = vec![
            vec!["7".to_string(), "Emma".to_string(), "12".to_string()],
            vec!["10".to_string(), "Persuasion".to_string(), "3".to_string()],
        ];
        let table = render(&["id", "title", "copies"], &rows, plain(None));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "id  title       copies");
        assert_eq!(lines[2], " 7  Emma            12");
        assert_eq!(lines[3], "10  Persuasion       3");
    }

    #[test]
    fn narrow_terminal_cuts_text_not_ids() {
        let rows = vec![vec![
            "123".to_string(),
            "x".repeat(60),
            "2026-03-01T09:00:00Z".to_string(),
        ]];
        let table = render(&["id", "title", "borrowed_at"], &rows, plain(Some(50)));
        let row = table.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 50);
        assert!(row.starts_with("123  "));
        assert!(row.contains('…'));
        assert!(row.ends_with("2026-03-01T09:00:00Z"));
    }

    #[test]
    fn text_columns_share_the_cut() {
        let rows = vec![vec!["a".repeat(30), "b".repeat(30)]];
        let table = render(&["title", "author"], &rows, plain(Some(42)));
        let header = table.lines().next().unwrap();
        let author_at = header.find("author").unwrap();
        assert!(author_at > 10, "title column should keep a fair share");
    }

    #[test]
    fn colour_wraps_padded_cell() {
        let rows = vec![vec!["0".to_string()]];
        let table = render(
            &["copies"],
            &rows,
            TableStyle {
                max_width: None,
                color: true,
            },
        );
        assert_eq!(table.lines().nth(2).unwrap(), "\u{1b}[31m     0\u{1b}[0m");
    }
}
