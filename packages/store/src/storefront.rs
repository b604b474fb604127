//! Contact details of the physical store and the links built from them.

/// Which map handler to target when opening the store address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    /// Anything without a native maps scheme.
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }
}

/// Static storefront details shown on the contact and about screens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Storefront {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub about: &'static str,
}

pub const STOREFRONT: Storefront = Storefront {
    name: "Usha Metals & Agency",
    address: "Usha Metals & Agency, Fancy Bazaar, Changanacherry - 686101",
    phone: "91-9961295835",
    about: "Welcome to our store! We are passionate about providing high-quality products and exceptional customer service.\n\nThank you for choosing us. We hope you enjoy your shopping experience!",
};

impl Storefront {
    /// Native maps link for `platform`; [`Storefront::web_map_url`] on other platforms.
    pub fn map_url(&self, platform: Platform) -> String {
        let query = urlencoding::encode(self.address);
        match platform {
            Platform::Ios => format!("maps://app?q={query}"),
            Platform::Android => format!("geo:0,0?q={query}"),
            Platform::Other => self.web_map_url(),
        }
    }

    /// Fallback used when the native maps link cannot be opened.
    pub fn web_map_url(&self) -> String {
        format!("https://maps.google.com/?q={}", urlencoding::encode(self.address))
    }

    pub fn tel_url(&self) -> String {
        format!("tel:{}", self.phone)
    }
}
