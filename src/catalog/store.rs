use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::catalog::{
    model::{Chartlet, ChartletCategory, ChartletIcon},
    provider::{BuiltinChartlets, ChartletProvider},
};

enum Response {
    Titles {
        generation: u64,
        titles: Vec<ChartletIcon>,
    },
    Entries {
        generation: u64,
        index: usize,
        entries: Vec<Chartlet>,
    },
}

type Inbox = Rc<RefCell<VecDeque<Response>>>;

/// Category tabs and their chartlets, filled from a [`ChartletProvider`].
///
/// Provider answers land in an inbox applied by [`ChartletCatalog::pump`]. Each answer carries
/// the generation it was requested in; [`ChartletCatalog::reset`] bumps the generation so
/// late answers for a closed catalog are dropped.
pub struct ChartletCatalog {
    provider: Box<dyn ChartletProvider>,
    inbox: Inbox,
    generation: u64,
    categories: Vec<ChartletCategory>,
    loading_titles: bool,
}

impl std::fmt::Debug for ChartletCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartletCatalog")
            .field("generation", &self.generation)
            .field("categories", &self.categories.len())
            .field("loading_titles", &self.loading_titles)
            .finish_non_exhaustive()
    }
}

impl Default for ChartletCatalog {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ChartletCatalog {
    /// Catalog backed by `provider`, or by [`BuiltinChartlets`] when none is configured.
    pub fn new(provider: Option<Box<dyn ChartletProvider>>) -> Self {
        Self {
            provider: provider.unwrap_or_else(|| Box::new(BuiltinChartlets)),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            generation: 0,
            categories: Vec::new(),
            loading_titles: false,
        }
    }

    /// Categories in tab order.
    pub fn categories(&self) -> &[ChartletCategory] {
        &self.categories
    }

    /// Whether the title request is in flight.
    pub fn is_loading_titles(&self) -> bool {
        self.loading_titles
    }

    /// Index of the selected category.
    pub fn selected_index(&self) -> Option<usize> {
        self.categories.iter().position(|c| c.is_selected)
    }

    /// Loaded entries of category `index`.
    pub fn entries(&self, index: usize) -> Option<&[Chartlet]> {
        self.categories.get(index).map(|c| c.entries.as_slice())
    }

    /// Ask the provider for the category titles.
    pub fn load_titles(&mut self) {
        self.loading_titles = true;
        let inbox = Rc::clone(&self.inbox);
        let generation = self.generation;
        self.provider.load_titles(Box::new(move |titles| {
            inbox
                .borrow_mut()
                .push_back(Response::Titles { generation, titles });
        }));
    }

    /// Append a tab backed by the user's album. It never loads provider entries.
    pub fn add_album_category(&mut self, icon: ChartletIcon) -> usize {
        let mut cat = ChartletCategory::new(icon);
        cat.is_album = true;
        self.categories.push(cat);
        self.categories.len() - 1
    }

    /// Select category `index`, deselecting the others, and request its entries if it has
    /// none yet. Returns `false` for an out-of-range index.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.categories.len() {
            return false;
        }
        for (i, cat) in self.categories.iter_mut().enumerate() {
            cat.is_selected = i == index;
        }

        let cat = &mut self.categories[index];
        if cat.is_album || cat.is_loading || !cat.entries.is_empty() {
            return true;
        }
        cat.is_loading = true;
        let title = cat.icon.clone();

        let inbox = Rc::clone(&self.inbox);
        let generation = self.generation;
        self.provider.load_entries(
            &title,
            index,
            Box::new(move |index, entries| {
                inbox.borrow_mut().push_back(Response::Entries {
                    generation,
                    index,
                    entries,
                });
            }),
        );
        true
    }

    /// Apply every queued provider answer. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(response) = next else {
                break;
            };
            if self.apply(response) {
                applied += 1;
            }
        }
        applied
    }

    /// Close the catalog: drop categories and ignore answers still in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.categories.clear();
        self.loading_titles = false;
        self.inbox.borrow_mut().clear();
    }

    fn apply(&mut self, response: Response) -> bool {
        match response {
            Response::Titles { generation, titles } => {
                if generation != self.generation {
                    tracing::debug!(generation, "stale title response dropped");
                    return false;
                }
                self.loading_titles = false;
                self.categories = titles.into_iter().map(ChartletCategory::new).collect();
                if !self.categories.is_empty() {
                    self.select(0);
                }
                true
            }
            Response::Entries {
                generation,
                index,
                entries,
            } => {
                if generation != self.generation {
                    tracing::debug!(generation, index, "stale entry response dropped");
                    return false;
                }
                let Some(cat) = self.categories.get_mut(index) else {
                    tracing::debug!(index, "entry response for unknown category dropped");
                    return false;
                };
                cat.is_loading = false;
                cat.entries = entries;
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
