/// Part of the statement currently being written.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    SqlDeleteFrom,
    SqlDeleteFromWhere,
    SqlJoin,
    SqlSelect,
    SqlSelectFrom,
    SqlSelectOrderBy,
    SqlSelectWhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub fragment: Fragment,
    /// Prefix column names with their table.
    pub qualify_columns: bool,
    /// Table of the columns that do not name one.
    pub default_table: &'static str,
}

impl Context {
    pub fn new(fragment: Fragment, qualify_columns: bool, default_table: &'static str) -> Self {
        Self {
            fragment,
            qualify_columns,
            default_table,
        }
    }
    pub fn switch_fragment(&self, fragment: Fragment) -> Context {
        Context { fragment, ..*self }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(Fragment::None, false, "")
    }
}
