//! Structural failure semantics: every malformation is a typed error at
//! the offending line, never a silently truncated entity.

use cetem_core::{CorpusError, CorpusReader, Sentence};

fn sentences(input: &str) -> Vec<cetem_core::Result<Sentence>> {
    CorpusReader::from_text(input).unwrap().sentences().collect()
}

#[test]
fn test_unterminated_sentence_is_unbalanced() {
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\t1\tcasa\tNCMS\n";
    let results = sentences(input);
    assert_eq!(results.len(), 1);
    match results[0].as_ref().unwrap_err() {
        CorpusError::UnbalancedMarkup { detail, .. } => {
            assert!(detail.contains("unclosed sentence"), "detail: {detail}");
        }
        other => panic!("expected UnbalancedMarkup, got {other:?}"),
    }
}

#[test]
fn test_paragraph_closed_before_sentence() {
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\t1\tcasa\tNCMS\n</p>\n";
    let results = sentences(input);
    match results[0].as_ref().unwrap_err() {
        CorpusError::UnbalancedMarkup { line, detail } => {
            assert_eq!(*line, 5);
            assert!(detail.contains("</p>"), "detail: {detail}");
        }
        other => panic!("expected UnbalancedMarkup, got {other:?}"),
    }
}

#[test]
fn test_close_with_no_open_region() {
    let results = sentences("</s>\n");
    match results[0].as_ref().unwrap_err() {
        CorpusError::UnbalancedMarkup { line, detail } => {
            assert_eq!(*line, 1);
            assert!(detail.contains("no open region"), "detail: {detail}");
        }
        other => panic!("expected UnbalancedMarkup, got {other:?}"),
    }
}

#[test]
fn test_short_data_line_is_malformed_record() {
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\n";
    let results = sentences(input);
    match results[0].as_ref().unwrap_err() {
        CorpusError::MalformedRecord { line, found } => {
            assert_eq!(*line, 4);
            assert_eq!(*found, 2);
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_data_line_outside_token_bearing_region() {
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\ncasa\tpol\t1\tcasa\tNCMS\n";
    let results = sentences(input);
    match results[0].as_ref().unwrap_err() {
        CorpusError::UnbalancedMarkup { line, .. } => assert_eq!(*line, 3),
        other => panic!("expected UnbalancedMarkup, got {other:?}"),
    }
}

#[test]
fn test_nested_mwe_is_unbalanced() {
    let input = "\
<ext n=1 sec=pol sem=1>
<p par=a1>
<s>
<mwe lema=x pos=Y>
<mwe lema=z pos=W>
";
    let results = sentences(input);
    assert!(matches!(
        results[0].as_ref().unwrap_err(),
        CorpusError::UnbalancedMarkup { line: 5, .. }
    ));
}

#[test]
fn test_iterator_fuses_after_error() {
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\n</s>\n</p>\n</ext>\n";
    let mut iter = CorpusReader::from_text(input).unwrap().sentences();
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_error_surfaces_at_token_granularity_too() {
    // Granularity changes the output shape, not the failure semantics
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\t1\tcasa\tNCMS\n";
    let results: Vec<_> = CorpusReader::from_text(input)
        .unwrap()
        .tokens()
        .collect();
    // One good token, then the unterminated-region error
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1].as_ref().unwrap_err(),
        CorpusError::UnbalancedMarkup { .. }
    ));
}

#[test]
fn test_well_formed_input_has_no_errors() {
    let input = "<ext n=1 sec=pol sem=1>\n<p par=a1>\n<s>\ncasa\tpol\t1\tcasa\tNCMS\n</s>\n</p>\n</ext>\n";
    let results = sentences(input);
    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());
}
