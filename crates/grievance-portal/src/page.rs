//! Pages of the portal. Exactly one is visible at a time.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Login,
    PortalHome,
    GrievanceForm,
    ThankYou,
    GrievanceList,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Login => "login",
            Page::PortalHome => "portal_home",
            Page::GrievanceForm => "grievance_form",
            Page::ThankYou => "thank_you",
            Page::GrievanceList => "grievance_list",
        };
        f.write_str(name)
    }
}
