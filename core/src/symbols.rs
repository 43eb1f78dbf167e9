/// Identity shared by the two cards of a pair, an index into [`SYMBOLS`].
pub type PairKey = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    /// Bootstrap icon class rendered on the card face.
    pub icon: &'static str,
}

impl Symbol {
    const fn new(name: &'static str, icon: &'static str) -> Self {
        Self { name, icon }
    }
}

pub const SYMBOLS: [Symbol; 12] = [
    Symbol::new("Python", "bi-filetype-py"),
    Symbol::new("SQL", "bi-database"),
    Symbol::new("ML", "bi-robot"),
    Symbol::new("Tableau", "bi-bar-chart-fill"),
    Symbol::new("Docker", "bi-box"),
    Symbol::new("Git", "bi-git"),
    Symbol::new("Cloud", "bi-cloud-fill"),
    Symbol::new("Excel", "bi-file-earmark-excel"),
    Symbol::new("Shell", "bi-terminal"),
    Symbol::new("JSON", "bi-filetype-json"),
    Symbol::new("Pipelines", "bi-diagram-3"),
    Symbol::new("Stats", "bi-graph-up"),
];

pub fn symbol(key: PairKey) -> Option<&'static Symbol> {
    SYMBOLS.get(usize::from(key))
}
