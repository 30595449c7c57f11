pub mod breadcrumbs;
pub mod code_view;
pub mod menu;
pub mod overlay;
pub mod sidebar;
pub mod tab_bar;

pub use breadcrumbs::Breadcrumbs;
pub use code_view::CodeView;
pub use menu::MenuBar;
pub use overlay::HelpOverlay;
pub use sidebar::Sidebar;
pub use tab_bar::{TabBar, TabHit};
