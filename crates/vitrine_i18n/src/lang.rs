/// One of the two page languages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    /// The language the markup is authored in
    #[default]
    Primary,
    Secondary,
}

impl Lang {
    /// The language a toggle switches to.
    pub fn other(self) -> Self {
        match self {
            Lang::Primary => Lang::Secondary,
            Lang::Secondary => Lang::Primary,
        }
    }
}
