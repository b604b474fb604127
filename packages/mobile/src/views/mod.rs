mod about_us;
pub use about_us::AboutUs;

mod admin_upload;
pub use admin_upload::AdminUpload;

mod contact_location;
pub use contact_location::ContactLocation;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod onboarding;
pub use onboarding::Onboarding;

mod sign_up;
pub use sign_up::SignUp;

mod view_document;
pub use view_document::ViewDocument;
