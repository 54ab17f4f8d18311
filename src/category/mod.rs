//! Categories for labelling posts, and the unification logic that merges
//! stored categories with the labels found on existing posts.

mod create;
mod db;
mod domain;
mod unify;

pub use create::{CreateCategoryEndpointState, create_category_endpoint};
pub(crate) use create::{category_select_view, load_selector_categories};
pub use db::{create_category, create_category_table, get_all_categories, get_category_names};
pub use domain::{Category, CategoryFormData, CategoryId, CategoryName};
pub use unify::{SelectorCategory, TagFilter, selector_categories, unify_category_names};
