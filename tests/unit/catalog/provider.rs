use std::{cell::RefCell, rc::Rc};

use super::*;

#[test]
fn builtin_answers_synchronously_with_one_title_per_group() {
    let got = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&got);
    BuiltinChartlets.load_titles(Box::new(move |titles| {
        *sink.borrow_mut() = Some(titles);
    }));
    let titles = got.borrow_mut().take().expect("answered synchronously");
    assert_eq!(titles.len(), BUILTIN_GROUPS.len());
    assert!(titles.iter().all(|t| matches!(t, ChartletIcon::Image(_))));
}

#[test]
fn builtin_entries_echo_the_index_and_are_deterministic() {
    let got = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&got);
    let icon = ChartletIcon::Url("ignored".into());
    BuiltinChartlets.load_entries(
        &icon,
        1,
        Box::new(move |index, entries| sink.borrow_mut().push((index, entries))),
    );
    let answers = got.borrow();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].0, 1);
    assert_eq!(answers[0].1.len(), BUILTIN_GROUPS[1].len());
    assert_eq!(answers[0].1, BuiltinChartlets::entries(1));
    assert_eq!(
        answers[0].1[0].ext,
        Some(serde_json::json!({"builtin": BUILTIN_GROUPS[1][0].name}))
    );
}

#[test]
fn out_of_range_group_is_empty() {
    assert!(BuiltinChartlets::entries(BUILTIN_GROUPS.len()).is_empty());
}
