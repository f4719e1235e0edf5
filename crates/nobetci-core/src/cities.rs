//! Static table of the cities the listing site serves.

use serde::ser::{Serialize, Serializer};

/// City codes (subdomain form) and their Turkish display names, in the order
/// the site lists them.
const CITIES: &[(&str, &str)] = &[
    ("adana", "Adana"),
    ("adiyaman", "Adıyaman"),
    ("afyon", "Afyon"),
    ("agri", "Ağrı"),
    ("amasya", "Amasya"),
    ("ankara", "Ankara"),
    ("antalya", "Antalya"),
    ("artvin", "Artvin"),
    ("aydin", "Aydın"),
    ("balikesir", "Balıkesir"),
    ("bilecik", "Bilecik"),
    ("bingol", "Bingöl"),
    ("bitlis", "Bitlis"),
    ("bolu", "Bolu"),
    ("burdur", "Burdur"),
    ("bursa", "Bursa"),
    ("canakkale", "Çanakkale"),
    ("cankiri", "Çankırı"),
    ("corum", "Çorum"),
    ("denizli", "Denizli"),
    ("diyarbakir", "Diyarbakır"),
    ("edirne", "Edirne"),
    ("elazig", "Elazığ"),
    ("erzincan", "Erzincan"),
    ("erzurum", "Erzurum"),
    ("eskisehir", "Eskişehir"),
    ("gaziantep", "Gaziantep"),
    ("giresun", "Giresun"),
    ("gumushane", "Gümüşhane"),
    ("hakkari", "Hakkâri"),
    ("hatay", "Hatay"),
    ("isparta", "Isparta"),
    ("mersin", "Mersin"),
    ("istanbul", "İstanbul"),
    ("izmir", "İzmir"),
    ("kars", "Kars"),
    ("kastamonu", "Kastamonu"),
    ("kayseri", "Kayseri"),
    ("kirklareli", "Kırklareli"),
    ("kirsehir", "Kırşehir"),
    ("kocaeli", "Kocaeli"),
    ("konya", "Konya"),
    ("kutahya", "Kütahya"),
    ("malatya", "Malatya"),
    ("manisa", "Manisa"),
    ("kahramanmaras", "Kahramanmaraş"),
    ("mardin", "Mardin"),
    ("mugla", "Muğla"),
    ("mus", "Muş"),
    ("nevsehir", "Nevşehir"),
    ("nigde", "Niğde"),
    ("ordu", "Ordu"),
    ("rize", "Rize"),
    ("sakarya", "Sakarya"),
    ("samsun", "Samsun"),
    ("siirt", "Siirt"),
    ("sinop", "Sinop"),
    ("sivas", "Sivas"),
    ("tekirdag", "Tekirdağ"),
    ("tokat", "Tokat"),
    ("trabzon", "Trabzon"),
    ("tunceli", "Tunceli"),
    ("sanliurfa", "Şanlıurfa"),
    ("usak", "Uşak"),
    ("van", "Van"),
    ("yozgat", "Yozgat"),
    ("zonguldak", "Zonguldak"),
    ("aksaray", "Aksaray"),
    ("bayburt", "Bayburt"),
    ("karaman", "Karaman"),
    ("kirikkale", "Kırıkkale"),
    ("batman", "Batman"),
    ("sirnak", "Şırnak"),
    ("bartin", "Bartın"),
    ("ardahan", "Ardahan"),
    ("igdir", "Iğdır"),
    ("yalova", "Yalova"),
    ("karabuk", "Karabük"),
    ("kilis", "Kilis"),
    ("osmaniye", "Osmaniye"),
    ("duzce", "Düzce"),
];

/// Ordered `(code, display name)` pairs for every supported city.
#[must_use]
pub fn supported_cities() -> &'static [(&'static str, &'static str)] {
    CITIES
}

/// Looks up the display name for a normalized city code.
#[must_use]
pub fn display_name(code: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

/// Serializes the city table as an ordered `{code: name}` JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportedCities;

impl Serialize for SupportedCities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(CITIES.iter().copied())
    }
}
