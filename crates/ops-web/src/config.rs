/// Static page configuration
pub struct Config {
    pub title: &'static str,
    /// Element the app mounts into; nothing renders when it is missing
    pub mount_selector: &'static str,
    pub labels: Labels,
}

/// Visible control text
pub struct Labels {
    pub date_from: &'static str,
    pub date_to: &'static str,
    pub category: &'static str,
    pub all_categories: &'static str,
    pub search: &'static str,
    pub export: &'static str,
    pub columns: &'static str,
    pub select_all: &'static str,
    pub select_none: &'static str,
}

pub static CONFIG: Config = Config {
    title: "Operations Dashboard",
    mount_selector: "[data-jshook=\"dashboard\"]",

    labels: Labels {
        date_from: "From",
        date_to: "To",
        category: "Category",
        all_categories: "All categories",
        search: "Search",
        export: "Export CSV",
        columns: "Columns",
        select_all: "Select all",
        select_none: "Select none",
    },
};
