use crate::{
    assets::builtin::BUILTIN_GROUPS,
    catalog::model::{Chartlet, ChartletIcon, ChartletSource},
};

/// Completion for a title request.
pub type TitlesResponse = Box<dyn FnOnce(Vec<ChartletIcon>)>;

/// Completion for an entry request: the category index it answers, then its entries.
pub type EntriesResponse = Box<dyn FnOnce(usize, Vec<Chartlet>)>;

/// Source of catalog content.
///
/// Responses may be delivered synchronously or later; the catalog drops answers that no longer
/// apply.
pub trait ChartletProvider {
    /// Request the category icons.
    fn load_titles(&mut self, respond: TitlesResponse);

    /// Request the chartlets of category `index`.
    fn load_entries(&mut self, title: &ChartletIcon, index: usize, respond: EntriesResponse);
}

/// Bundled catalog answered synchronously from the built-in artwork.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinChartlets;

impl BuiltinChartlets {
    /// Category icons: the first artwork of every group.
    pub fn titles() -> Vec<ChartletIcon> {
        BUILTIN_GROUPS
            .iter()
            .filter_map(|group| group.first())
            .filter_map(|art| match art.rasterize() {
                Ok(bmp) => Some(ChartletIcon::Image(bmp)),
                Err(err) => {
                    tracing::warn!(art = art.name, error = %err, "builtin icon failed");
                    None
                }
            })
            .collect()
    }

    /// Entries of group `index`; empty when out of range.
    pub fn entries(index: usize) -> Vec<Chartlet> {
        let Some(group) = BUILTIN_GROUPS.get(index) else {
            return Vec::new();
        };
        group
            .iter()
            .filter_map(|art| match art.rasterize() {
                Ok(bmp) => Some(
                    Chartlet::new(ChartletSource::Image(bmp))
                        .with_ext(serde_json::json!({ "builtin": art.name })),
                ),
                Err(err) => {
                    tracing::warn!(art = art.name, error = %err, "builtin sticker failed");
                    None
                }
            })
            .collect()
    }
}

impl ChartletProvider for BuiltinChartlets {
    fn load_titles(&mut self, respond: TitlesResponse) {
        respond(Self::titles());
    }

    fn load_entries(&mut self, _title: &ChartletIcon, index: usize, respond: EntriesResponse) {
        respond(index, Self::entries(index));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/provider.rs"]
mod tests;
