/*!
 * Statistical ANSI codepage guessing.
 *
 * The buffer is decoded with every candidate codepage and the decoded text is
 * scored on how plausible its non-ASCII characters are: letters of the
 * codepage's own script score, control characters, replacement characters,
 * stray symbols and case flips inside a word cost. Accented Latin letters are
 * expected inside ASCII words, while Cyrillic, Greek, Hebrew and Arabic
 * letters are expected to form words of their own.
 */

use encoding_rs::{
    BIG5, EUC_JP, EUC_KR, Encoding, GB18030, GBK, ISO_8859_2, ISO_8859_3, ISO_8859_4, ISO_8859_5,
    ISO_8859_6, ISO_8859_7, ISO_8859_8, ISO_8859_8_I, ISO_8859_13, ISO_8859_15, KOI8_R, KOI8_U,
    SHIFT_JIS, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_874, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252,
    WINDOWS_1253, WINDOWS_1254, WINDOWS_1255, WINDOWS_1256, WINDOWS_1257, WINDOWS_1258,
};
use log::trace;

/// Writing system a codepage is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Hebrew,
    Arabic,
    Thai,
    /// Double-byte codepage, scored on its raw lead bytes
    Cjk,
}

impl Script {
    fn contains(self, c: char) -> bool {
        let code = c as u32;
        match self {
            Script::Latin => (0x00C0..=0x024F).contains(&code) || (0x1E00..=0x1EFF).contains(&code),
            Script::Cyrillic => (0x0400..=0x04FF).contains(&code),
            Script::Greek => (0x0370..=0x03FF).contains(&code),
            Script::Hebrew => (0x0590..=0x05FF).contains(&code),
            Script::Arabic => {
                (0x0600..=0x06FF).contains(&code)
                    || (0xFB50..=0xFDFF).contains(&code)
                    || (0xFE70..=0xFEFF).contains(&code)
            }
            Script::Thai => (0x0E00..=0x0E7F).contains(&code),
            Script::Cjk => false,
        }
    }

    // Most frequent letters of the main languages written in the script
    fn common_letters(self) -> &'static str {
        match self {
            Script::Cyrillic => "оеаинтсрвлкмдпуя",
            Script::Greek => "αοετινσυρπκμληωςάέίόή",
            Script::Hebrew => "יוהלאמבשרתנעדכם",
            Script::Arabic => "اليمونرتبعهدكسقفأةىإ",
            Script::Thai => "านรอกงมยวสลดทตขบคหปจเแไใโะัีิ",
            Script::Latin | Script::Cjk => "",
        }
    }
}

/// Candidates in priority order; ties go to the earlier entry
pub const GUESS_CANDIDATES: &[(u16, Script)] = &[
    (1252, Script::Latin),
    (1250, Script::Latin),
    (1251, Script::Cyrillic),
    (1253, Script::Greek),
    (1254, Script::Latin),
    (1255, Script::Hebrew),
    (1256, Script::Arabic),
    (1257, Script::Latin),
    (874, Script::Thai),
    (932, Script::Cjk),
    (949, Script::Cjk),
    (936, Script::Cjk),
    (950, Script::Cjk),
];

// Codepages with a decoder, in reverse-lookup preference order
const KNOWN_CODEPAGES: &[u16] = &[
    65001, 1200, 1201, 1252, 1250, 1251, 1253, 1254, 1255, 1256, 1257, 1258, 874, 932, 936, 949,
    950, 20866, 21866, 28591, 28592, 28593, 28594, 28595, 28596, 28597, 28598, 28599, 28603,
    28605, 38598, 51932, 54936,
];

// Lead byte ranges of frequent characters, then of punctuation, per
// double-byte codepage
const DOUBLE_BYTE_LEADS: &[(u16, &[(u8, u8)], &[(u8, u8)])] = &[
    (932, &[(0x82, 0x83), (0x88, 0x98)], &[(0x81, 0x81)]),
    (949, &[(0xB0, 0xC8)], &[(0xA1, 0xA3)]),
    (936, &[(0xB0, 0xD7)], &[(0xA1, 0xA3)]),
    (950, &[(0xA4, 0xC6)], &[(0xA1, 0xA3)]),
];

/// Decoder for a Windows codepage number
pub fn encoding_for_codepage(codepage: u16) -> Option<&'static Encoding> {
    let encoding = match codepage {
        874 => WINDOWS_874,
        932 => SHIFT_JIS,
        936 => GBK,
        949 => EUC_KR,
        950 => BIG5,
        1200 => UTF_16LE,
        1201 => UTF_16BE,
        1250 => WINDOWS_1250,
        1251 => WINDOWS_1251,
        1252 => WINDOWS_1252,
        1253 => WINDOWS_1253,
        1254 => WINDOWS_1254,
        1255 => WINDOWS_1255,
        1256 => WINDOWS_1256,
        1257 => WINDOWS_1257,
        1258 => WINDOWS_1258,
        20866 => KOI8_R,
        21866 => KOI8_U,
        28591 => WINDOWS_1252,
        28592 => ISO_8859_2,
        28593 => ISO_8859_3,
        28594 => ISO_8859_4,
        28595 => ISO_8859_5,
        28596 => ISO_8859_6,
        28597 => ISO_8859_7,
        28598 => ISO_8859_8,
        28599 => WINDOWS_1254,
        28603 => ISO_8859_13,
        28605 => ISO_8859_15,
        38598 => ISO_8859_8_I,
        51932 => EUC_JP,
        54936 => GB18030,
        65001 => UTF_8,
        _ => return None,
    };
    Some(encoding)
}

/// Windows codepage number of a decoder, if it has one
pub fn codepage_for_encoding(encoding: &'static Encoding) -> Option<u16> {
    KNOWN_CODEPAGES
        .iter()
        .copied()
        .find(|&codepage| encoding_for_codepage(codepage) == Some(encoding))
}

/// Guess the ANSI codepage of `buffer`, or `None` for plain ASCII or when no
/// candidate decodes into plausible text
pub fn guess_codepage(buffer: &[u8]) -> Option<u16> {
    if buffer.is_ascii() {
        return None;
    }

    let mut best: Option<(u16, i64)> = None;
    for &(codepage, script) in GUESS_CANDIDATES {
        let Some(encoding) = encoding_for_codepage(codepage) else {
            continue;
        };
        let (text, _) = encoding.decode_without_bom_handling(buffer);
        let score = match script {
            Script::Cjk => score_double_byte(buffer, codepage, &text),
            _ => score_decoded(&text, script),
        };
        trace!("Codepage {} scored {}", codepage, score);

        if score > 0 && best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((codepage, score));
        }
    }

    best.map(|(codepage, _)| codepage)
}

/// Plausibility of `text` decoded with a single-byte codepage for `script`
pub fn score_decoded(text: &str, script: Script) -> i64 {
    let chars: Vec<char> = text.chars().collect();
    let common = script.common_letters();
    let mut score = 0i64;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii() {
            continue;
        }
        if c.is_control() || c == '\u{FFFD}' || is_private_use(c) {
            score -= 5;
            continue;
        }

        let native = script.contains(c);
        if !c.is_alphabetic() {
            if native {
                score += 1;
            }
            continue;
        }

        let previous = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let touches_ascii_letter = previous.is_some_and(|p| p.is_ascii_alphabetic())
            || next.is_some_and(|n| n.is_ascii_alphabetic());

        score += if !native {
            -2
        } else if script == Script::Latin {
            if touches_ascii_letter { 3 } else { 1 }
        } else if touches_ascii_letter {
            0
        } else if c.to_lowercase().next().is_some_and(|lower| common.contains(lower)) {
            3
        } else {
            1
        };

        // Case flips inside a word
        if previous.is_some_and(|p| p.is_alphabetic() && p.is_lowercase()) && c.is_uppercase() {
            score -= 3;
        }
        if c.is_lowercase() && next.is_some_and(|n| n.is_alphabetic() && n.is_uppercase()) {
            score -= 3;
        }
    }

    score
}

/// Plausibility of `buffer` in a double-byte codepage, from its lead bytes
fn score_double_byte(buffer: &[u8], codepage: u16, text: &str) -> i64 {
    let Some(&(_, frequent, punctuation)) = DOUBLE_BYTE_LEADS.iter().find(|(cp, _, _)| *cp == codepage)
    else {
        return 0;
    };
    let in_ranges =
        |byte: u8, ranges: &[(u8, u8)]| ranges.iter().any(|&(low, high)| (low..=high).contains(&byte));

    let mut score = 0i64;
    let mut i = 0;
    while i < buffer.len() {
        let lead = buffer[i];
        if lead < 0x80 {
            i += 1;
            continue;
        }
        // Half-width katakana are single bytes in Shift_JIS
        if codepage == 932 && (0xA1..=0xDF).contains(&lead) {
            score += 1;
            i += 1;
            continue;
        }
        if i + 1 >= buffer.len() {
            break;
        }
        if in_ranges(lead, frequent) {
            score += 4;
        } else if in_ranges(lead, punctuation) {
            score += 1;
        }
        i += 2;
    }

    let replacements = text.chars().filter(|&c| c == '\u{FFFD}').count() as i64;
    score - replacements * 5
}

fn is_private_use(c: char) -> bool {
    (0xE000..=0xF8FF).contains(&(c as u32))
}
