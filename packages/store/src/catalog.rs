//! Static product catalog and its filter.
//!
//! [`ProductQuery`] compiles into a chain of optional predicates. A product id
//! short-circuits everything else; the remaining filters are AND-ed together.

use crate::models::{OnboardingSlide, Product};

const DESCRIPTION: &str = "ERGONOMIC DESIGN : Sleepsia car neck pillow provide exceptional support for your neck during car journeys. Designed to cradle your neck and support its natural curvature, reducing strain and promoting relaxation.";

static PRODUCTS: [Product; 5] = [
    Product {
        id: 1,
        name: "Preethi Mixer - PEPPY_PRO",
        category: "Mixer",
        brand: "Preethi",
        capacity: Some("750w"),
        price: "6750.00",
        offer_price: "5750.00",
        currency: "₹",
        description: DESCRIPTION,
        quantity_available: 5,
        deal: true,
        popular: true,
    },
    Product {
        id: 2,
        name: "Sujata Griner Jar",
        category: "Accessories",
        brand: "Sujata",
        capacity: Some("900w"),
        price: "1050.00",
        offer_price: "850.00",
        currency: "₹",
        description: DESCRIPTION,
        quantity_available: 5,
        deal: true,
        popular: true,
    },
    Product {
        id: 3,
        name: "Brass Lamp - GPY",
        category: "Brass Lamp",
        brand: "Shiva",
        capacity: None,
        price: "1250.00",
        offer_price: "1050.00",
        currency: "₹",
        description: DESCRIPTION,
        quantity_available: 5,
        deal: false,
        popular: true,
    },
    Product {
        id: 4,
        name: "Bombay Thali - SS",
        category: "Stainless Steel",
        brand: "Ankur",
        capacity: None,
        price: "350.00",
        offer_price: "250.00",
        currency: "₹",
        description: DESCRIPTION,
        quantity_available: 5,
        deal: false,
        popular: false,
    },
    Product {
        id: 5,
        name: "Twist PC - SS",
        category: "Cooker",
        brand: "Anantha",
        capacity: Some("5 Litres"),
        price: "4150.00",
        offer_price: "3250.00",
        currency: "₹",
        description: DESCRIPTION,
        quantity_available: 5,
        deal: false,
        popular: true,
    },
];

/// Every product in the catalog.
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Pages of the first-launch carousel.
pub const ONBOARDING_SLIDES: [OnboardingSlide; 4] = [
    OnboardingSlide {
        title: "Welcome to Our Store!",
        description: "Discover amazing products curated just for you.",
    },
    OnboardingSlide {
        title: "Exclusive Offers",
        description: "Get access to special deals and discounts.",
    },
    OnboardingSlide {
        title: "Shop Anytime, Anywhere",
        description: "Your favorite store, now in your pocket.",
    },
    OnboardingSlide {
        title: "WELCOME",
        description: "Your shopping companion.",
    },
];

type Predicate = Box<dyn Fn(&Product) -> bool>;

/// Catalog filter. An empty query matches every product.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductQuery {
    pub product_id: Option<u32>,
    pub popular: bool,
    pub deal: bool,
    pub search: Option<String>,
}

impl ProductQuery {
    pub fn by_id(id: u32) -> Self {
        Self {
            product_id: Some(id),
            ..Self::default()
        }
    }

    pub fn popular(mut self) -> Self {
        self.popular = true;
        self
    }

    pub fn deals(mut self) -> Self {
        self.deal = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    fn predicates(&self) -> Vec<Predicate> {
        if let Some(id) = self.product_id {
            return vec![Box::new(move |p: &Product| p.id == id)];
        }

        let mut chain: Vec<Predicate> = Vec::new();
        if self.popular {
            chain.push(Box::new(|p: &Product| p.popular));
        }
        if self.deal {
            chain.push(Box::new(|p: &Product| p.deal));
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            chain.push(Box::new(move |p: &Product| p.mentions(&needle)));
        }
        chain
    }

    /// Run the query against the static catalog.
    pub fn run(&self) -> Vec<&'static Product> {
        self.apply(products())
    }

    pub fn apply<'a>(&self, items: &'a [Product]) -> Vec<&'a Product> {
        let chain = self.predicates();
        items.iter().filter(|p| chain.iter().all(|keep| keep(p))).collect()
    }
}
