// ==========================================
// HEX VIEW
// ==========================================

/// Printable ASCII is shown as-is, everything else as `.`.
#[inline]
#[must_use]
pub fn ascii(byte: u8) -> char {
    if (32..=126).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Renders `row_count` rows of `width` bytes starting at row `first_row`.
///
/// Each line is `OFFSET: ` followed by one three-column cell per byte and
/// the ASCII column. The cell under `cursor` is marked with `>` instead of
/// a space. Rows past the end of the sequence are omitted.
#[must_use]
pub fn hex_rows(
    bytes: &editor_core::piece_table::sequence::ByteSequence,
    width: usize,
    first_row: usize,
    row_count: usize,
    cursor: Option<usize>,
) -> Vec<String> {
    let width = width.max(1);
    let start = first_row.saturating_mul(width).min(bytes.len());
    let count = row_count.saturating_mul(width).min(bytes.len() - start);
    let window = bytes.get_range(start, count).unwrap_or_default();

    window
        .chunks(width)
        .enumerate()
        .map(|(row, chunk)| {
            let offset = start + row * width;
            let mut line = format!("{offset:08X}:");

            for (col, byte) in chunk.iter().enumerate() {
                let marker = if cursor == Some(offset + col) { '>' } else { ' ' };
                line.push(marker);
                line.push_str(&format!("{byte:02X}"));
            }

            for _ in chunk.len()..width {
                line.push_str("   ");
            }

            line.push_str("  |");
            line.extend(chunk.iter().copied().map(ascii));
            line.push('|');

            line
        })
        .collect()
}

// ==========================================
// DETAIL PANEL
// ==========================================

/// Two lines describing `value` in binary, octal, unsigned and signed decimal.
#[must_use]
pub fn detail(value: u8) -> [String; 2] {
    [
        format!("{:<23}unsigned decimal: {}", format!("binary: {value:08b}"), value),
        format!("{:<23}signed   decimal: {}", format!("octal : {value:03o}"), value as i8),
    ]
}

// ==========================================
// HISTORY PANELS
// ==========================================

#[must_use]
pub fn history_line(command: &editor_core::enums::Command) -> String {
    match *command {
        editor_core::enums::Command::Revise {
            index,
            old_value,
            new_value,
        } => format!("{index:08X}:  revise {old_value:02X} >> {new_value:02X}"),
        editor_core::enums::Command::Insert {
            index,
            inserted_value,
        } => format!("{index:08X}:  insert {inserted_value:02X}"),
        editor_core::enums::Command::Delete {
            index,
            removed_value,
        } => format!("{index:08X}:  remove {removed_value:02X}"),
    }
}

/// At most `max_rows` lines, in the order `commands` yields them.
#[must_use]
pub fn history_lines<'a>(
    commands: impl IntoIterator<Item = &'a editor_core::enums::Command>,
    max_rows: usize,
) -> Vec<String> {
    commands
        .into_iter()
        .take(max_rows)
        .map(history_line)
        .collect()
}
