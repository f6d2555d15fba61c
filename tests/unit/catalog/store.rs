use super::*;
use crate::catalog::{model::ChartletSource, provider::{EntriesResponse, TitlesResponse}};

/// Provider that parks callbacks so tests decide when (and whether) they fire.
#[derive(Clone, Default)]
struct Deferred {
    titles: Rc<RefCell<Vec<TitlesResponse>>>,
    entries: Rc<RefCell<Vec<(usize, EntriesResponse)>>>,
}

impl ChartletProvider for Deferred {
    fn load_titles(&mut self, respond: TitlesResponse) {
        self.titles.borrow_mut().push(respond);
    }

    fn load_entries(&mut self, _title: &ChartletIcon, index: usize, respond: EntriesResponse) {
        self.entries.borrow_mut().push((index, respond));
    }
}

fn icons(n: usize) -> Vec<ChartletIcon> {
    (0..n).map(|i| ChartletIcon::Url(format!("icon{i}"))).collect()
}

fn chartlets(n: usize) -> Vec<Chartlet> {
    (0..n)
        .map(|i| Chartlet::new(ChartletSource::Url(format!("c{i}"))))
        .collect()
}

#[test]
fn builtin_catalog_fills_first_category_after_pump() {
    let mut cat = ChartletCatalog::default();
    cat.load_titles();
    assert!(cat.is_loading_titles());
    // Titles, then the entries requested by the automatic first selection.
    assert_eq!(cat.pump(), 2);
    assert!(!cat.is_loading_titles());
    assert_eq!(cat.selected_index(), Some(0));
    let first = &cat.categories()[0];
    assert!(!first.is_loading);
    assert_eq!(first.entries.len(), crate::assets::builtin::BUILTIN_GROUPS[0].len());

    assert!(cat.select(1));
    assert_eq!(cat.pump(), 1);
    assert!(!cat.categories()[0].is_selected);
    assert!(cat.categories()[1].is_selected);
    assert!(!cat.entries(1).unwrap_or_default().is_empty());
}

#[test]
fn selection_marks_loading_until_entries_arrive() {
    let provider = Deferred::default();
    let mut cat = ChartletCatalog::new(Some(Box::new(provider.clone())));
    cat.load_titles();
    let respond = provider.titles.borrow_mut().pop().expect("title request");
    respond(icons(3));
    assert_eq!(cat.pump(), 1);
    assert_eq!(cat.categories().len(), 3);
    assert!(cat.categories()[0].is_loading);

    assert!(cat.select(2));
    assert!(cat.categories()[2].is_loading);
    assert_eq!(cat.selected_index(), Some(2));

    let (index, respond) = provider.entries.borrow_mut().pop().expect("entry request");
    assert_eq!(index, 2);
    respond(index, chartlets(4));
    assert_eq!(cat.pump(), 1);
    assert!(!cat.categories()[2].is_loading);
    assert_eq!(cat.entries(2).map(<[Chartlet]>::len), Some(4));
}

#[test]
fn reselecting_a_loading_category_does_not_request_twice() {
    let provider = Deferred::default();
    let mut cat = ChartletCatalog::new(Some(Box::new(provider.clone())));
    cat.load_titles();
    let respond = provider.titles.borrow_mut().pop().expect("title request");
    respond(icons(2));
    cat.pump();
    assert_eq!(provider.entries.borrow().len(), 1);
    cat.select(0);
    assert_eq!(provider.entries.borrow().len(), 1);
}

#[test]
fn stale_and_out_of_range_answers_are_dropped() {
    let provider = Deferred::default();
    let mut cat = ChartletCatalog::new(Some(Box::new(provider.clone())));
    cat.load_titles();
    let stale_titles = provider.titles.borrow_mut().pop().expect("title request");

    cat.reset();
    stale_titles(icons(5));
    assert_eq!(cat.pump(), 0);
    assert!(cat.categories().is_empty());

    cat.load_titles();
    let respond = provider.titles.borrow_mut().pop().expect("title request");
    respond(icons(1));
    cat.pump();
    let (_, respond) = provider.entries.borrow_mut().pop().expect("entry request");
    respond(7, chartlets(2));
    assert_eq!(cat.pump(), 0);
    assert!(cat.categories()[0].entries.is_empty());
    assert!(!cat.select(3));
}

#[test]
fn album_tabs_never_request_entries() {
    let provider = Deferred::default();
    let mut cat = ChartletCatalog::new(Some(Box::new(provider.clone())));
    let idx = cat.add_album_category(ChartletIcon::Url("album".into()));
    assert!(cat.select(idx));
    assert!(cat.categories()[idx].is_album);
    assert!(!cat.categories()[idx].is_loading);
    assert!(provider.entries.borrow().is_empty());
}
