//! Character-substitution transforms behind the text commands.
//!
//! Every transform is a pure function over its table, so the mappings can
//! be exercised without a gateway connection. Randomness (the leet
//! alternatives) is injected through a caller-supplied [`Rng`].

use rand::seq::SliceRandom;
use rand::Rng;

const ECIHO_CYRILLIC_FROM: &str = "сзчшщжуюваёяэкгфйыъьд";
const ECIHO_CYRILLIC_TO: &str = "ццццццооооееехххииииб";
const ECIHO_LATIN_FROM: &str = "uavwjyqkhfxdzs";
const ECIHO_LATIN_TO: &str = "ooooiigggggbcc";

const FLIP_FROM: &str = "abcdefghijklmnopqrstuvwxyzабвгдежзиклмнопрстуфхцчшщъьэя.,!?()";
const FLIP_TO: &str = "ɐqɔpǝɟƃɥıɾʞlɯuodᕹɹsʇnʌʍxʎzɐƍʚɹɓǝжεиʞvwноudɔɯʎȸхǹҺmmqqєʁ˙‘¡¿)(";

const LEET: &[(char, &[&str])] = &[
    ('A', &["/-|", "4"]),
    ('B', &["8"]),
    ('C', &["(", "["]),
    ('D', &["|)"]),
    ('E', &["3"]),
    ('F', &["|=", "ph"]),
    ('G', &["6"]),
    ('H', &["|-|"]),
    ('I', &["|", "!", "1"]),
    ('J', &[")"]),
    ('K', &["|<", "|("]),
    ('L', &["|_", "1"]),
    ('M', &["|\\/|", "/\\/\\"]),
    ('N', &["|\\|", "/\\/"]),
    ('O', &["0", "()"]),
    ('P', &["|>"]),
    ('Q', &["9", "0"]),
    ('R', &["|?", "|2"]),
    ('S', &["5", "$"]),
    ('T', &["7", "+"]),
    ('U', &["|_|"]),
    ('V', &["\\/"]),
    ('W', &["\\/\\/", "\\X/"]),
    ('X', &["*", "><"]),
    ('Y', &["'/"]),
    ('Z', &["2"]),
];

const LEET_CYRILLIC: &[(char, &[&str])] = &[
    ('А', &["A"]),
    ('Б', &["6"]),
    ('В', &["B"]),
    ('Г', &["r"]),
    ('Д', &["D", "g"]),
    ('Е', &["E"]),
    ('Ё', &["E"]),
    ('Ж', &["}|{", ">|<"]),
    ('З', &["3"]),
    ('И', &["u", "N"]),
    ('Й', &["u*"]),
    ('К', &["K"]),
    ('Л', &["JI", "/I"]),
    ('М', &["M"]),
    ('Н', &["H"]),
    ('О', &["O"]),
    ('П', &["II", "n", "/7"]),
    ('Р', &["P"]),
    ('С', &["C"]),
    ('Т', &["T", "m"]),
    ('У', &["Y", "y"]),
    ('Ф', &["cp", "(|)", "qp"]),
    ('Х', &["X"]),
    ('Ц', &["U", "LL", "L|"]),
    ('Ч', &["4"]),
    ('Ш', &["W", "LLI"]),
    ('Щ', &["W", "LLL"]),
    ('Ъ', &["~b", "`b"]),
    ('Ы', &["bl"]),
    ('Ь', &["b"]),
    ('Э', &["-)"]),
    ('Ю', &["IO", "10"]),
    ('Я', &["9", "9I"]),
    ('%', &["o\\o"]),
];

const DIGIT_WORDS: [&str; 10] = [
    ":zero:", ":one:", ":two:", ":three:", ":four:", ":five:", ":six:", ":seven:", ":eight:",
    ":nine:",
];

/// The "eciho" cipher: cyrillic pass, adjacent-duplicate collapse, latin pass.
pub fn eciho(text: &str) -> String {
    let pass = map_chars(text, ECIHO_CYRILLIC_FROM, ECIHO_CYRILLIC_TO);
    let pass = collapse_adjacent(&pass);
    map_chars(&pass, ECIHO_LATIN_FROM, ECIHO_LATIN_TO)
}

/// Flips text upside-down through the paired table, reversing it.
pub fn flip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars().rev() {
        // these four have no single-character flipped form
        match c {
            'ю' => out.push_str("oı"),
            'ы' => out.push_str("ıq"),
            'ё' => out.push_str("ǝ̤"),
            'й' => out.push_str("n̯"),
            _ => out.push(flip_char(c)),
        }
    }
    out
}

/// Replaces printable ASCII with full-width forms.
pub fn fullwidth(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' ' => '　',
            '!'..='~' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn leet<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    substitute_random(&text.to_uppercase(), LEET, rng)
}

pub fn leet_cyrillic<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    substitute_random(&text.to_uppercase(), LEET_CYRILLIC, rng)
}

/// Spells text out with emoji: regional indicators for letters, word
/// emoji for digits, keycaps and arrows, with zero-width spaces between
/// every symbol so Discord renders them separately.
pub fn emojify(text: &str) -> String {
    let mut out = String::from("\u{200b}");
    for c in text.chars() {
        match c {
            'a'..='z' | 'A'..='Z' => {
                let index = c.to_ascii_lowercase() as u32 - 'a' as u32;
                match char::from_u32(0x1F1E6 + index) {
                    Some(indicator) => out.push(indicator),
                    None => out.push(c),
                }
            }
            '0'..='9' => out.push_str(DIGIT_WORDS[(c as u8 - b'0') as usize]),
            ' ' => out.push_str("　　"),
            '#' => out.push_str("#⃣"),
            '*' => out.push_str("*⃣"),
            '↓' => out.push('⬇'),
            '↑' => out.push('⬆'),
            '←' => out.push('⬅'),
            '→' => out.push('➡'),
            '—' => out.push('➖'),
            '.' => out.push('⏺'),
            '!' => out.push('ℹ'),
            _ => out.push(c),
        }
        out.push('\u{200b}');
    }
    out
}

/// Applies a paired character table, preserving case: uppercase input
/// maps through the lowercase table to an uppercased result.
fn map_chars(text: &str, from: &str, to: &str) -> String {
    text.chars()
        .map(|c| {
            let lower = c.to_lowercase().next().unwrap_or(c);
            match from
                .chars()
                .position(|f| f == lower)
                .and_then(|i| to.chars().nth(i))
            {
                Some(mapped) if lower != c => mapped.to_uppercase().next().unwrap_or(mapped),
                Some(mapped) => mapped,
                None => c,
            }
        })
        .collect()
}

fn collapse_adjacent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = None;
    for c in text.chars() {
        if last != Some(c) {
            out.push(c);
        }
        last = Some(c);
    }
    out
}

fn flip_char(c: char) -> char {
    if let Some(i) = FLIP_FROM.chars().position(|f| f == c) {
        FLIP_TO.chars().nth(i).unwrap_or(c)
    } else if let Some(i) = FLIP_TO.chars().position(|f| f == c) {
        FLIP_FROM.chars().nth(i).unwrap_or(c)
    } else {
        c
    }
}

/// One alternative is chosen per table entry per call, so repeated
/// letters within one message substitute consistently.
fn substitute_random<R: Rng + ?Sized>(
    text: &str,
    table: &[(char, &[&str])],
    rng: &mut R,
) -> String {
    let chosen: Vec<(char, &str)> = table
        .iter()
        .map(|(from, options)| (*from, options.choose(rng).copied().unwrap_or("")))
        .collect();

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match chosen.iter().find(|(from, _)| *from == c) {
            Some((_, substitution)) => out.push_str(substitution),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn eciho_maps_latin_consonants() {
        assert_eq!(eciho("hash"), "gocg");
    }

    #[test]
    fn eciho_collapses_repeats_before_the_latin_pass() {
        assert_eq!(eciho("сс"), "ц");
        assert_eq!(eciho("aa"), "o");
    }

    #[test]
    fn eciho_preserves_case() {
        assert_eq!(eciho("Сыр"), "Цир");
    }

    #[test]
    fn flip_turns_text_upside_down() {
        assert_eq!(flip("hello"), "ollǝɥ");
        assert_eq!(flip("Why?"), "¿ʎɥʍ");
    }

    #[test]
    fn flip_expands_unpaired_cyrillic() {
        assert_eq!(flip("ю"), "oı");
        assert_eq!(flip("ы"), "ıq");
    }

    #[test]
    fn fullwidth_maps_printable_ascii() {
        assert_eq!(fullwidth("Hello, world! 123"), "Ｈｅｌｌｏ，　ｗｏｒｌｄ！　１２３");
    }

    #[test]
    fn fullwidth_leaves_other_characters_alone() {
        assert_eq!(fullwidth("привет"), "привет");
    }

    #[test]
    fn leet_only_emits_table_alternatives() {
        let mut rng = StdRng::seed_from_u64(7);
        for (letter, options) in LEET {
            let out = leet(&letter.to_string(), &mut rng);
            assert!(options.contains(&out.as_str()), "{letter} became {out}");
        }
    }

    #[test]
    fn leet_uppercases_and_passes_unknown_characters_through() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(leet("@ 42", &mut rng), "@ 42");
    }

    #[test]
    fn leet_cyrillic_only_emits_table_alternatives() {
        let mut rng = StdRng::seed_from_u64(7);
        for (letter, options) in LEET_CYRILLIC {
            let out = leet_cyrillic(&letter.to_string(), &mut rng);
            assert!(options.contains(&out.as_str()), "{letter} became {out}");
        }
    }

    #[test]
    fn leet_substitutes_repeated_letters_consistently() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = leet("ss", &mut rng);
        assert!(out == "55" || out == "$$", "got {out}");
    }

    #[test]
    fn emojify_spells_letters_and_digits() {
        assert_eq!(emojify("a"), "\u{200b}🇦\u{200b}");
        assert_eq!(emojify("Z"), "\u{200b}🇿\u{200b}");
        assert_eq!(emojify("0"), "\u{200b}:zero:\u{200b}");
        assert_eq!(emojify("#"), "\u{200b}#⃣\u{200b}");
    }

    #[test]
    fn emojify_widens_spaces() {
        assert_eq!(emojify(" "), "\u{200b}　　\u{200b}");
    }
}
