use rtt_reconcile::newick::to_newick;
use rtt_reconcile::nexus::{self, NexusParser};
use rtt_reconcile::parser::preprocess::strip_annotations;
use rtt_reconcile::parser::{ByteParser, ParsingErrorType};
use rtt_reconcile::reconcile::root_to_tip;
use rtt_reconcile::{parse_tree, parse_tree_file};
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

#[test]
fn test_timetree_with_annotations() {
    let result = parse_tree_file(fixture("timetree.nexus"));
    if let Err(e) = &result {
        eprintln!("Error parsing time tree: {:?}", e);
    }
    let tree = result.unwrap();

    assert!(tree.is_valid());
    assert_eq!(tree.name(), Some("tree1"));
    assert_eq!(tree.num_leaves(), 6);
    assert_eq!(tree.root().num_children(), 2);
    assert_eq!(tree.root().name(), Some("NODE_0000000"));
    assert_eq!(tree.tip_names()[0], "hCoV-19/South Africa/S1/2021");
}

#[test]
fn test_translate_matches_newick() {
    let nexus_tree = parse_tree_file(fixture("divergence_tree.nexus")).unwrap();
    let newick_tree = parse_tree_file(fixture("divergence_tree.nwk")).unwrap();

    assert!(nexus_tree.is_valid());
    assert_eq!(nexus_tree.tip_names(), newick_tree.tip_names());
    assert_eq!(to_newick(&nexus_tree), to_newick(&newick_tree));
    assert_eq!(
        root_to_tip(&nexus_tree).unwrap(),
        root_to_tip(&newick_tree).unwrap()
    );
}

#[test]
fn test_annotations_need_stripping() {
    let text = std::fs::read_to_string(fixture("divergence_tree.nexus")).unwrap();

    // `[&...]` blocks are plain comments to the tokenizer, so both parse
    let raw = nexus::parse_str(&text).unwrap();
    let stripped = nexus::parse_str(strip_annotations(&text)).unwrap();
    assert_eq!(to_newick(&raw), to_newick(&stripped));
}

#[test]
fn test_lowercase_marker_and_keywords() {
    let input = "#nexus\nbegin trees;\n  translate a Kea, b Kaka, c Kakapo;\n  tree t = [&U] ((a:1,b:2):1,c:3);\nend;\n";
    let tree = parse_tree(input).unwrap();
    assert_eq!(tree.tip_names(), vec!["Kea", "Kaka", "Kakapo"]);
}

#[test]
fn test_first_of_several_trees() {
    let input = "#NEXUS\nBegin Trees;\n Tree first = ((A,B),C);\n Tree second = (A,(B,C));\nEnd;\n";
    let trees = NexusParser::new(ByteParser::for_str(input)).parse_all().unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1].name(), Some("second"));

    let tree = parse_tree(input).unwrap();
    assert_eq!(tree.name(), Some("first"));
}

#[test]
fn test_label_not_in_taxa_block() {
    let input = "#NEXUS\nBegin Taxa;\n Dimensions NTax=2;\n TaxLabels A B;\nEnd;\nBegin Trees;\n Tree t = (A,C);\nEnd;\n";
    let err = parse_tree(input).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::UnresolvedLabel(_)));
}

#[test]
fn test_empty_trees_block() {
    let input = "#NEXUS\nBegin Trees;\nEnd;\n";
    let err = parse_tree(input).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::NoTreeFound);
}

#[test]
fn test_no_trees_block() {
    let input = "#NEXUS\nBegin Taxa;\n Dimensions NTax=2;\n TaxLabels A B;\nEnd;\n";
    let err = parse_tree(input).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidTreesBlock(_)));
}

#[test]
fn test_invalid_translate() {
    let input = "#NEXUS\nBegin Trees;\n Translate 1 A, 1 B;\n Tree t = (1,2);\nEnd;\n";
    let err = parse_tree(input).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidTranslateCommand(_)));
}
