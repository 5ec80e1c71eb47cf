//! Screen states for the admin TUI

pub mod add_question;
pub mod cm;
pub mod cm_form;
pub mod help;
pub mod main_menu;
pub mod question_form;
pub mod questions;
pub mod signed_out;
pub mod users;

pub use add_question::AddQuestionScreen;
pub use cm::CmScreen;
pub use cm_form::CmForm;
pub use help::HelpScreen;
pub use main_menu::MainMenuScreen;
pub use question_form::QuestionForm;
pub use questions::QuestionsScreen;
pub use signed_out::SignedOutScreen;
pub use users::UsersScreen;
