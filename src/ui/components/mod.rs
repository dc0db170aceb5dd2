pub mod menu;
pub mod question_card;
pub mod summary_card;
pub mod topic_list;
