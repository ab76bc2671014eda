//! ARPAbet-style phone names to IPA.

/// IPA rendering of a phone name. A trailing stress digit is ignored; names
/// without a mapping are returned unchanged.
pub fn phone_to_ipa(phone: &str) -> &str {
    let base = phone.trim_end_matches(|c: char| c.is_ascii_digit());
    match base {
        // vowels
        "aa" => "ɑ",
        "ae" => "æ",
        "ah" => "ʌ",
        "ao" => "ɔ",
        "aw" => "aʊ",
        "ax" => "ə",
        "axr" => "ɚ",
        "ay" => "aɪ",
        "eh" => "ɛ",
        "er" => "ɝ",
        "ey" => "eɪ",
        "ih" => "ɪ",
        "iy" => "i",
        "ow" => "oʊ",
        "oy" => "ɔɪ",
        "uh" => "ʊ",
        "uw" => "u",
        "ux" => "ʉ",
        // consonants
        "b" => "b",
        "ch" => "tʃ",
        "d" => "d",
        "dh" => "ð",
        "dx" => "ɾ",
        "el" => "ɫ",
        "em" => "m̩",
        "en" => "n̩",
        "f" => "f",
        "g" => "ɡ",
        "hh" => "h",
        "jh" => "dʒ",
        "k" => "k",
        "l" => "l",
        "m" => "m",
        "n" => "n",
        "ng" => "ŋ",
        "nx" => "ɾ̃",
        "p" => "p",
        "q" => "ʔ",
        "r" => "ɹ",
        "s" => "s",
        "sh" => "ʃ",
        "t" => "t",
        "th" => "θ",
        "v" => "v",
        "w" => "w",
        "wh" => "ʍ",
        "y" => "j",
        "z" => "z",
        "zh" => "ʒ",
        _ => phone,
    }
}

/// Concatenated IPA for one word's phones, with stress marks at syllable
/// starts.
///
/// Every vowel (a phone ending in a stress digit) is a syllable nucleus. The
/// first syllable starts at the first phone; a later one takes the single
/// consonant just before its vowel as onset. Primary stress (`1`) gets `ˈ`
/// except on the first syllable, and secondary stress (`2`) always gets `ˌ`.
pub fn phones_to_ipa<'a, I>(phones: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let phones: Vec<&str> = phones.into_iter().collect();
    let mut marks: Vec<Option<char>> = vec![None; phones.len()];
    let mut prev_vowel: Option<usize> = None;

    for (i, phone) in phones.iter().enumerate() {
        let Some(stress) = phone.chars().last().filter(char::is_ascii_digit) else {
            continue;
        };
        let start = match prev_vowel {
            None => 0,
            Some(p) if i - p > 1 => i - 1,
            Some(_) => i,
        };
        marks[start] = match stress {
            '1' if prev_vowel.is_some() => Some('ˈ'),
            '2' => Some('ˌ'),
            _ => None,
        };
        prev_vowel = Some(i);
    }

    let mut out = String::new();
    for (phone, mark) in phones.iter().zip(marks) {
        out.extend(mark);
        out.push_str(phone_to_ipa(phone));
    }
    out
}
