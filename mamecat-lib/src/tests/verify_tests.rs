use super::*;
use crate::fake_tool::FakeTool;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Reports every requested name as good, except those starting with "bad".
fn verifyroms(args: &[String]) -> String {
    args.iter()
        .skip(1)
        .map(|name| {
            if name.starts_with("bad") {
                format!("romset {name} is bad\n")
            } else {
                format!("romset {name} is good\n")
            }
        })
        .collect()
}

#[test]
fn parses_good_sets_and_parents() {
    let text = "romset pacman [puckman] is good\n\
                romset puckman is good\n\
                romset galaga is bad\n\
                romset dkong [dkongj] is best available\n\
                2 romsets found, 2 were OK.\n";
    assert_eq!(
        parse_verify_output(text),
        vec![
            VerifiedEntry::new("pacman", "puckman"),
            VerifiedEntry::new("puckman", ""),
        ]
    );
}

#[test]
fn ignores_lines_without_a_name() {
    assert!(parse_verify_output("romset  is good\n").is_empty());
    assert!(parse_verify_output("").is_empty());
}

#[test]
fn candidates_are_zip_stems_without_duplicates() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    std::fs::write(first.path().join("pacman.zip"), b"").unwrap();
    std::fs::write(first.path().join("galaga.ZIP"), b"").unwrap();
    std::fs::write(first.path().join("readme.txt"), b"").unwrap();
    std::fs::create_dir(first.path().join("folder.zip")).unwrap();
    std::fs::write(second.path().join("pacman.zip"), b"").unwrap();
    std::fs::write(second.path().join("dkong.zip"), b"").unwrap();

    let dirs = vec![
        first.path().to_path_buf(),
        first.path().join("missing"),
        second.path().to_path_buf(),
    ];
    assert_eq!(
        rom_candidates(&dirs).unwrap(),
        names(&["galaga", "pacman", "dkong"])
    );
}

#[test]
fn verifies_in_batches() {
    let tool = FakeTool::new(verifyroms);
    let roms = names(&["pacman", "badset", "galaga", "dkong", "mspacman"]);
    let mut seen = Vec::new();

    let verified = RomVerifier::new(&tool)
        .with_batch_size(2)
        .verify(&roms, &mut |p| seen.push(p))
        .unwrap();

    assert_eq!(verified.len(), 4);
    assert!(!verified.contains_key("badset"));
    let batch_lengths: Vec<usize> = tool.calls().iter().map(|c| c.len() - 1).collect();
    assert_eq!(batch_lengths, vec![2, 2, 1]);
    assert!(tool.calls().iter().all(|c| c[0] == "-verifyroms"));
    assert_eq!(seen.last(), Some(&50));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn empty_batched_result_retries_one_name_at_a_time() {
    // Old MAME builds only answer when given a single name.
    let tool = FakeTool::new(|args: &[String]| {
        if args.len() == 2 {
            format!("romset {} [parent] is good\n", args[1])
        } else {
            String::new()
        }
    });
    let roms = names(&["a", "b", "c"]);

    let verified = RomVerifier::new(&tool).verify(&roms, &mut |_| {}).unwrap();

    assert_eq!(verified.len(), 3);
    assert_eq!(verified["b"], "parent");
    assert_eq!(tool.calls().len(), 4);
    assert_eq!(tool.calls()[0].len(), 4);
}

#[test]
fn nothing_good_at_single_names_is_an_error() {
    let tool = FakeTool::new(|args: &[String]| {
        args.iter()
            .skip(1)
            .map(|n| format!("romset {n} is bad\n"))
            .collect()
    });
    let roms = names(&["g1", "g2", "g3"]);

    let result = RomVerifier::new(&tool).verify(&roms, &mut |_| {});

    assert!(matches!(result, Err(CatalogError::EmptyVerificationResult)));
    // One batched pass, then one call per name.
    assert_eq!(tool.calls().len(), 4);
}

#[test]
fn nothing_good_with_single_name_batches_is_not_retried() {
    let tool = FakeTool::constant("");
    let roms = names(&["a", "b"]);

    let result = RomVerifier::new(&tool)
        .with_batch_size(1)
        .verify(&roms, &mut |_| {});

    assert!(matches!(result, Err(CatalogError::EmptyVerificationResult)));
    assert_eq!(tool.calls().len(), 2);
}

#[test]
fn no_candidates_skips_the_tool() {
    let tool = FakeTool::constant("");
    let mut seen = Vec::new();
    let verified = RomVerifier::new(&tool)
        .verify(&[], &mut |p| seen.push(p))
        .unwrap();
    assert!(verified.is_empty());
    assert!(tool.calls().is_empty());
    assert_eq!(seen, vec![50]);
}
