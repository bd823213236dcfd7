use rosterchk::checker::dictionary::{FstDictionary, MemoryDictionary, WordDictionary};
use rosterchk::checker::{Classification, RosterValidator};
use rosterchk::parser::{fixup_capitals, parse};
use rosterchk::roster::{unique_words, CsvRosterSource, RosterStore};
use rosterchk::{Name, Roster, SpellingResult};
use std::fs;
use tempfile::tempdir;

fn roster() -> Roster {
    Roster::new(vec![
        Name::new("Matthew", "Spooner"),
        Name::new("Ana", "Pierre"),
        Name::new("Ana Maria", "St. Pierre-Quanto"),
    ])
}

fn fst_validator() -> RosterValidator<FstDictionary> {
    let roster = roster();
    let dictionary = FstDictionary::from_vocabulary(&unique_words(&roster)).unwrap();
    RosterValidator::new(roster, dictionary, '\n')
}

#[test]
fn test_parsed_names_round_trip_through_encoding() {
    for raw in [
        "matthew spooner",
        "ana st. pierre",
        "ana maria pierre",
        "ana maria st. pierre-quanto",
    ] {
        let name = parse(raw).unwrap();
        assert!(Name::decode(&name.to_encoded()).unwrap().is_same(&name));
    }
}

#[test]
fn test_parse_output_is_already_canonical() {
    let name = parse("  ANA   maria  st.  PIERRE-quanto ").unwrap();
    assert_eq!(fixup_capitals(name.first()), name.first());
    assert_eq!(fixup_capitals(name.last()), name.last());
    assert!(parse(&name.to_string()).unwrap().is_same(&name));
}

#[test]
fn test_fst_backed_batch() {
    let result = fst_validator().check_spelling(
        "  matthew   Spooner  \nana maria st. pierre-quanto\nana pierrre\nmatthew pierre\n",
    );

    let SpellingResult::Checked {
        canonical_lines,
        marked_lines,
    } = result
    else {
        panic!("batch unexpectedly rejected");
    };

    assert_eq!(
        canonical_lines,
        "Matthew Spooner\nAna Maria St. Pierre-Quanto\nAna Pierrre\nMatthew Pierre\n"
    );
    let marked: Vec<&str> = marked_lines.split('\n').collect();
    assert_eq!(marked.len(), 5);
    assert_eq!(marked[0], "");
    assert_eq!(marked[1], "");
    assert_eq!(
        marked[2],
        "Error: \"Pierrre\" is not a registered last name. Did you mean: Pierre?"
    );
    assert_eq!(
        marked[3],
        "Error: \"Matthew Pierre\" is not a registered name pair."
    );
    assert_eq!(marked[4], "");
}

#[test]
fn test_fst_dictionary_ignores_case_of_vocabulary() {
    let dictionary =
        FstDictionary::from_vocabulary(&["ana".to_string(), "PIERRE".to_string()]).unwrap();
    let validator = RosterValidator::new(
        Roster::new(vec![Name::new("Ana", "Pierre")]),
        dictionary,
        '\n',
    );
    assert_eq!(
        validator.classify(&Name::new("Ana", "Pierre")),
        Classification::Registered
    );
}

#[test]
fn test_suggestions_are_capitalized() {
    let dictionary = MemoryDictionary::new(["Ana"])
        .with_suggestions("St. Pierrre", vec!["st. pierre-quanto", "st. pierre"]);
    let validator = RosterValidator::new(roster(), dictionary, '\n');

    assert_eq!(
        validator.classify(&parse("ana st. pierrre").unwrap()),
        Classification::LastUnknown {
            suggestions: vec!["St. Pierre-Quanto".to_string(), "St. Pierre".to_string()],
        }
    );
}

#[test]
fn test_reload_from_csv_source() {
    let dir = tempdir().unwrap();
    let sheet = dir.path().join("pairings.csv");
    fs::write(&sheet, ",,\n,First,Last\n,Jo,Park\n,Lee,Ray\n").unwrap();
    let base = dir.path().join("base.txt");
    fs::write(&base, "Smith\n").unwrap();

    let store = RosterStore::new(dir.path().join("pairs.nms"), dir.path().join("names.dict"))
        .with_base_vocabulary(Some(base));
    let mut validator = fst_validator();

    let report = validator.reload_data(&CsvRosterSource::new(&sheet), &store);
    assert!(report.reloaded);
    assert_eq!(report.pairs, 2);

    let lines = validator.check_lines("jo park\nlee smith\nmatthew spooner").unwrap();
    assert_eq!(lines[0].diagnostic, "");
    assert_eq!(
        lines[1].diagnostic,
        "Error: \"Lee Smith\" is not a registered name pair."
    );
    assert!(lines[2].diagnostic.starts_with("Error: Both"));

    let persisted = FstDictionary::load_from_path(store.dictionary_path()).unwrap();
    assert!(persisted.known("Smith"));
    assert!(persisted.known("Park"));
    assert_eq!(store.load_pairs().unwrap().len(), 2);
}
