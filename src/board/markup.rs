use askama::Template;

use super::roster::{RosterItem, EMPTY_ROSTER_TEXT};
use super::status::StatusSnapshot;
use super::view::{ActivitiesList, ActivitySelect, SignupForm, ViewHandles};

#[derive(Template)]
#[template(path = "index.html")]
pub struct BoardPageTemplate<'a> {
    pub list: &'a ActivitiesList,
    pub select: &'a ActivitySelect,
    pub form: &'a SignupForm,
    pub message: StatusSnapshot,
    pub empty_roster_text: &'a str,
    pub build_id: &'a str,
}

pub fn render_page(view: &ViewHandles) -> askama::Result<String> {
    let list = view.activities_list();
    let select = view.activity_select();
    let form = view.signup_form();
    BoardPageTemplate {
        list: &list,
        select: &select,
        form: &form,
        message: view.message().snapshot(),
        empty_roster_text: EMPTY_ROSTER_TEXT,
        build_id: env!("ROSTER_BUILD_ID"),
    }
    .render()
}
