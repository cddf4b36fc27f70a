/// Pages of the app and the paths they live at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    Inventory,
    Discover,
    CarDetail(i64),
    Profile,
    Login,
    Register,
}

impl AppRoute {
    pub fn path(self) -> String {
        match self {
            AppRoute::Inventory => "/".to_string(),
            AppRoute::Discover => "/dealers".to_string(),
            AppRoute::CarDetail(id) => format!("/cars/{id}"),
            AppRoute::Profile => "/profile".to_string(),
            AppRoute::Login => "/login".to_string(),
            AppRoute::Register => "/register".to_string(),
        }
    }

    /// Where to send the visitor instead, if this page is not for them.
    /// The profile needs a user; login and register are for visitors only.
    pub fn redirect_for(self, signed_in: bool) -> Option<AppRoute> {
        match (self, signed_in) {
            (AppRoute::Profile, false) => Some(AppRoute::Login),
            (AppRoute::Login | AppRoute::Register, true) => Some(AppRoute::Inventory),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppRoute::Profile, false, Some(AppRoute::Login))]
    #[case(AppRoute::Profile, true, None)]
    #[case(AppRoute::Login, true, Some(AppRoute::Inventory))]
    #[case(AppRoute::Register, true, Some(AppRoute::Inventory))]
    #[case(AppRoute::Login, false, None)]
    #[case(AppRoute::CarDetail(3), false, None)]
    #[case(AppRoute::Inventory, true, None)]
    fn guards(#[case] route: AppRoute, #[case] signed_in: bool, #[case] expected: Option<AppRoute>) {
        assert_eq!(route.redirect_for(signed_in), expected);
    }

    #[test]
    fn detail_path_embeds_id() {
        assert_eq!(AppRoute::CarDetail(42).path(), "/cars/42");
        assert_eq!(AppRoute::Discover.path(), "/dealers");
    }
}
