//! Text layout helpers shared by the emitters

use crate::model::Vector;
use serde::{Deserialize, Serialize};

/// Line terminator of the generated text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

pub fn tab(indent: usize) -> String {
    "\t".repeat(indent)
}

/// Line break followed by `indent` tabs
pub fn new_line(ending: LineEnding, indent: usize) -> String {
    let mut line = String::with_capacity(2 + indent);
    line.push_str(ending.as_str());
    line.push_str(&tab(indent));
    line
}

/// Six fixed decimals with a `.` separator whatever the host locale
///
/// Rounds half-up on the shortest decimal form of the value, so
/// `0.0078125` gives `0.007813`.
pub fn format_float(value: f32) -> String {
    if !value.is_finite() {
        return format!("{:.6}", value);
    }
    let shortest = f64::from(value).to_string();
    let (negative, digits) = match shortest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, shortest.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(FLOAT_DECIMALS))
        .collect();
    if frac_part.as_bytes().get(FLOAT_DECIMALS).is_some_and(|digit| *digit >= b'5') {
        round_up(&mut kept);
    }

    let split = kept.len() - FLOAT_DECIMALS;
    let mut out = String::with_capacity(kept.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|digit| char::from(*digit)));
    out.push('.');
    out.extend(kept[split..].iter().map(|digit| char::from(*digit)));
    out
}

const FLOAT_DECIMALS: usize = 6;

/// Add one unit in the last place of a decimal digit string
fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// `+00012.500000,-00003.000000,+00000.000000`
pub fn format_vector(vector: &Vector) -> String {
    format!(
        "{:+013.6},{:+013.6},{:+013.6}",
        vector.x, vector.y, vector.z
    )
}
