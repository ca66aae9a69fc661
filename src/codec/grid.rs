//! British National Grid reference codec.
//!
//! A grid reference is two letters naming a 100 km square followed by an even
//! number of digits (0 to 10) that subdivide it, e.g. "SU", "SU41",
//! "TL 032 386", "SU 40052 10037". Spacing is ignored on input.

use log::debug;

/// Rows of the 500 km / 100 km letter table, southernmost row first.
/// 'I' is not used in the grid.
const NATGRID_LETTERS: [&str; 5] = ["VWXYZ", "QRSTU", "LMNOP", "FGHJK", "ABCDE"];

/// A decoded grid reference: the lower-left corner of the referenced cell
/// plus the cell size implied by the number of digits supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRef {
    /// Canonical display form of the reference, e.g. "TL 032 386".
    pub name: String,
    /// Lower-left easting in metres (EPSG:27700).
    pub easting: i32,
    /// Lower-left northing in metres (EPSG:27700).
    pub northing: i32,
    /// Side of the referenced cell in metres.
    pub cell_size: i32,
}

/// Decodes a grid reference string.
///
/// Case and whitespace are ignored. Returns `None` for anything that is not a
/// plausible reference: wrong shape, odd digit count, or letters naming a
/// square outside the grid. A `None` is a non-match, not an error.
pub fn decode(text: &str) -> Option<GridRef> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let mut chars = cleaned.chars();
    let c1 = chars.next().filter(char::is_ascii_alphabetic)?;
    let c2 = chars.next().filter(char::is_ascii_alphabetic)?;
    let digits: &str = &cleaned[2..];
    if digits.len() > 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Letter values A=0, B=1, ..., shuffled down above 'I' since 'I' is unused.
    let mut l1 = c1 as i32 - 'A' as i32;
    let mut l2 = c2 as i32 - 'A' as i32;
    if l1 > 7 {
        l1 -= 1;
    }
    if l2 > 7 {
        l2 -= 1;
    }

    // 100km-square indexes from the false origin (grid square SV).
    let es = ((l1 - 2) % 5) * 5 + (l2 % 5);
    let ns = (19 - (l1 / 5) * 5) - (l2 / 5);
    if !(0..=6).contains(&es) || !(0..=12).contains(&ns) {
        return None;
    }

    let cell_size = match digits.len() {
        0 => 100_000,
        2 => 10_000,
        4 => 1_000,
        6 => 100,
        8 => 10,
        10 => 1,
        // odd digit counts are not a valid reference
        _ => return None,
    };

    let half = digits.len() / 2;
    let (e_digits, n_digits) = digits.split_at(half);
    let easting: i32 = format!("{es}{e_digits}").parse().ok()?;
    let northing: i32 = format!("{ns}{n_digits}").parse().ok()?;
    let easting = easting * cell_size;
    let northing = northing * cell_size;

    let name = join_reference(&format!("{c1}{c2}"), e_digits, n_digits);
    debug!("decoded grid reference {name:?}: easting={easting} northing={northing} cell={cell_size}");

    Some(GridRef {
        name,
        easting,
        northing,
        cell_size,
    })
}

/// Encodes EPSG:27700 coordinates as a fixed-precision grid reference.
///
/// `digits` is the total digit count (split evenly across the axes, at most
/// ten). Digits beyond metre precision are truncated, not rounded. Returns
/// `None` when the coordinates fall outside the lettered grid.
pub fn encode(easting: i32, northing: i32, digits: usize) -> Option<String> {
    if easting < 0 || northing < 0 {
        return None;
    }

    let big = 500_000;
    let small = big / 5;
    let first_dig = small / 10;
    let per_axis = digits / 2;

    let mut e = easting;
    let mut n = northing;

    // 500km square, shifted so the S square sits at (2, 1).
    let es = e / big + 2;
    let ns = n / big + 1;
    e %= big;
    n %= big;
    if es > 4 || ns > 4 {
        return None;
    }
    let mut out = String::new();
    out.push(NATGRID_LETTERS[ns as usize].as_bytes()[es as usize] as char);

    // 100km square within it.
    let es = e / small;
    let ns = n / small;
    e %= small;
    n %= small;
    out.push(NATGRID_LETTERS[ns as usize].as_bytes()[es as usize] as char);

    // Spaces only when there are digits, so zero-figure references stay "SK".
    if per_axis > 0 {
        out.push(' ');
        let mut dig = first_dig;
        for _ in 0..per_axis.min(5) {
            out.push(char::from_digit((e / dig % 10) as u32, 10)?);
            dig /= 10;
        }
        out.push(' ');
        let mut dig = first_dig;
        for _ in 0..per_axis.min(5) {
            out.push(char::from_digit((n / dig % 10) as u32, 10)?);
            dig /= 10;
        }
    }

    Some(out)
}

/// Encodes EPSG:27700 coordinates as the most condensed grid reference that
/// still identifies the point: full ten-figure precision with every trailing
/// digit position where *both* axes read zero trimmed away.
///
/// `encode_condensed(440000, 110000)` is `"SU41"`; `encode_condensed(400000,
/// 100000)` is just `"SU"`.
pub fn encode_condensed(easting: i32, northing: i32) -> Option<String> {
    let verbose = encode(easting, northing, 10)?;
    let cleaned: String = verbose.chars().filter(|c| !c.is_whitespace()).collect();
    let letters = &cleaned[..2];
    let digits = &cleaned[2..];
    let half = digits.len() / 2;
    let (e_digits, n_digits) = digits.split_at(half);

    // Trim from the least-significant end while both axes are '0'.
    let mut keep = half;
    for i in (0..half).rev() {
        if e_digits.as_bytes()[i] == b'0' && n_digits.as_bytes()[i] == b'0' {
            keep = i;
        } else {
            break;
        }
    }

    Some(join_reference(letters, &e_digits[..keep], &n_digits[..keep]))
}

/// Joins the letter pair and per-axis digit strings, spacing the three parts
/// only when each axis carries more than two digits.
fn join_reference(letters: &str, e_digits: &str, n_digits: &str) -> String {
    if e_digits.len() > 2 {
        format!("{letters} {e_digits} {n_digits}")
    } else {
        format!("{letters}{e_digits}{n_digits}")
    }
}
