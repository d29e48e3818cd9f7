mod calc;
mod diary;
mod foods;
mod helpers;
mod profile;
mod recommend;

pub(crate) use calc::{cmd_calc_bmi, cmd_calc_due_date, cmd_calc_heart_rate};
pub(crate) use diary::{cmd_diary_food, cmd_diary_show, cmd_diary_vitals};
pub(crate) use foods::cmd_foods;
pub(crate) use profile::{cmd_profile_history, cmd_profile_save, cmd_profile_show};
pub(crate) use recommend::cmd_recommend;
