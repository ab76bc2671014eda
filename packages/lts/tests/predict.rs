//! End-to-end prediction over a small hand-built model.
//
//   cargo test -p fluent_flite_lts --test predict
//

use anyhow::Result;
use fluent_flite_lts::{
    DecisionModel, LetterIndex, LetterSymbol, LtsConfig, LtsError, LtsRules, PhoneTable, Rule,
    letters,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/* ───────────────────────────────────────── fixture ─── */

const PHONES: [&str; 7] = ["epsilon", "k", "ae1", "t", "k-s", "s", "eh1"];

// window layout for w = 4: 0..4 left context (3 = previous letter),
// 4..8 right context (4 = next letter), 8 = extra feature
const NEXT: u8 = 4;
const EXTRA: u8 = 8;

fn l(c: char) -> LetterSymbol {
    LetterSymbol::from_char(c)
}

fn toy_rules() -> Result<LtsRules> {
    let records = [
        /* 0  a */ Rule::leaf(2),
        /* 1  c */ Rule::question(NEXT, l('e'), 2, 3),
        /* 2    */ Rule::leaf(5),
        /* 3    */ Rule::leaf(1),
        /* 4  t */ Rule::leaf(3),
        /* 5  x */ Rule::leaf(4),
        /* 6  e */ Rule::question(NEXT, LetterSymbol::BOUNDARY, 7, 8),
        /* 7    */ Rule::leaf(0),
        /* 8    */ Rule::leaf(6),
        /* 9  q */ Rule::question(NEXT, l('u'), 200, 7),
        /* 10 o */ Rule::question(EXTRA, l('n'), 8, 7),
    ];
    let mut starts = [None; 26];
    for (letter, addr) in [('a', 0), ('c', 1), ('t', 4), ('x', 5), ('e', 6), ('q', 9), ('o', 10)] {
        starts[(letter as u8 - b'a') as usize] = Some(addr);
    }
    Ok(LtsRules::new(
        "toy",
        LetterIndex::new(starts),
        PhoneTable::new(PHONES)?,
        DecisionModel::from_rules(&records),
        LtsConfig::default(),
    )?)
}

fn names(rules: &LtsRules, word: &str) -> Result<Vec<String>> {
    Ok(rules
        .predict(&letters(word))?
        .into_iter()
        .map(|p| rules.phones().name(p).to_string())
        .collect())
}

/* ───────────────────────────────────────── prediction ─── */

#[test]
fn predicts_letter_by_letter() -> Result<()> {
    let rules = toy_rules()?;
    assert_eq!(names(&rules, "cat")?, ["k", "ae1", "t"]);
    // c before e is soft, word-final e is silent
    assert_eq!(names(&rules, "ace")?, ["ae1", "s"]);
    assert_eq!(names(&rules, "eat")?, ["eh1", "ae1", "t"]);
    Ok(())
}

#[test]
fn clusters_stay_merged_until_applied() -> Result<()> {
    let rules = toy_rules()?;
    assert_eq!(names(&rules, "tax")?, ["t", "ae1", "k-s"]);
    assert_eq!(rules.apply("tax")?, ["t", "ae1", "k", "s"]);
    assert_eq!(rules.apply("TAX")?, ["t", "ae1", "k", "s"]);
    Ok(())
}

#[test]
fn non_letters_and_uncovered_letters_yield_nothing() -> Result<()> {
    let rules = toy_rules()?;
    assert!(names(&rules, "b")?.is_empty());
    assert!(names(&rules, "42")?.is_empty());
    assert!(names(&rules, "")?.is_empty());
    // the digit is skipped but still sits in the window of its neighbours
    assert_eq!(names(&rules, "3at")?, ["ae1", "t"]);
    Ok(())
}

#[test]
fn extra_feature_slots_reach_the_model() -> Result<()> {
    let rules = toy_rules()?;
    assert!(names(&rules, "o")?.is_empty());
    let with_feat = rules.predict_with_features(&letters("o"), &[l('n')])?;
    assert_eq!(with_feat.len(), 1);
    assert_eq!(rules.phones().name(with_feat[0]), "eh1");
    Ok(())
}

#[test]
fn prediction_is_deterministic() -> Result<()> {
    let rules = toy_rules()?;
    let alphabet = ['a', 'c', 'e', 't', 'x', 'o', 'b', '7'];
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let len = rng.random_range(0..12);
        let word: String = (0..len)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect();
        let first = rules.predict(&letters(&word))?;
        let second = rules.predict(&letters(&word))?;
        assert_eq!(first, second, "word {word:?}");
        assert_eq!(rules.clone().predict(&letters(&word))?, first);
    }
    Ok(())
}

/* ───────────────────────────────────────── corruption ─── */

#[test]
fn bad_jump_aborts_the_prediction() -> Result<()> {
    let rules = toy_rules()?;
    let err = rules.predict(&letters("qu")).expect_err("jump to 200");
    assert!(matches!(err, LtsError::ModelAddress { addr: 200, records: 11 }));
    // the same tree is fine when the bad branch is not taken
    assert!(names(&rules, "qa")?.len() == 1);
    Ok(())
}

#[test]
fn start_addresses_are_checked_up_front() {
    let model = DecisionModel::from_rules(&[Rule::leaf(0)]);
    let err = LtsRules::cmu(model).expect_err("cmu index needs a full model");
    assert!(matches!(err, LtsError::ModelAddress { .. }));
}

#[test]
fn unknown_phone_codes_are_corruption() -> Result<()> {
    let mut starts = [None; 26];
    starts[0] = Some(0);
    let rules = LtsRules::new(
        "short-table",
        LetterIndex::new(starts),
        PhoneTable::new(["epsilon"])?,
        DecisionModel::from_rules(&[Rule::leaf(3)]),
        LtsConfig::default(),
    )?;
    assert!(matches!(
        rules.predict(&letters("a")),
        Err(LtsError::PhoneIndex { code: 3, len: 1 })
    ));
    Ok(())
}

#[test]
fn narrow_windows_pad_with_boundary_only() -> Result<()> {
    let mut starts = [None; 26];
    starts[(b'e' - b'a') as usize] = Some(0);
    // w = 1: window is [prev, next, extra]
    let rules = LtsRules::new(
        "narrow",
        LetterIndex::new(starts),
        PhoneTable::new(PHONES)?,
        DecisionModel::from_rules(&[
            Rule::question(0, LetterSymbol::BOUNDARY, 1, 2),
            Rule::leaf(6),
            Rule::leaf(0),
        ]),
        LtsConfig {
            context_window: 1,
            extra_features: 1,
        },
    )?;
    assert_eq!(names(&rules, "ee")?, ["eh1"]);
    Ok(())
}
