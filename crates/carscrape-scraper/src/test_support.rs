//! Shared fixtures and a canned-response [`PageFetcher`].

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ScraperError;
use crate::fetch::PageFetcher;

pub(crate) const DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Toyota Camry 2019 | 45 000 AZN</title></head>
<body>
<div class="content">
  <table class="car-info">
    <tr><td class="rowone price_car1">45 000 AZN</td></tr>
    <tr><td>Şəhər:</td><td><a href="/city/1">Bakı</a></td></tr>
    <tr><td>Marka:</td><td><a href="/brand/7">Toyota</a></td></tr>
    <tr><td>Model:</td><td><a href="/model/70">Camry</a></td></tr>
    <tr><td>Buraxılış ili:</td><td>2019</td></tr>
    <tr><td>Ban növü:</td><td>Sedan</td></tr>
    <tr><td>Rəng:</td><td>Ağ</td></tr>
    <tr><td>Mühərrikin həcmi:</td><td>2.5 L</td></tr>
    <tr><td>Mühərrikin gücü:</td><td>181 a.g.</td></tr>
    <tr><td>Yanacaq növü:</td><td>Benzin</td></tr>
    <tr><td>Yürüş:</td><td>62 000 km</td></tr>
    <tr><td>Sürətlər qutusu:</td><td>Avtomat</td></tr>
    <tr><td>Ötürücü:</td><td>Ön</td></tr>
    <tr><td>Yeni:</td><td>Xeyr</td></tr>
    <tr><td>Kredit:</td><td>Var</td></tr>
    <tr><td>Barter mümkündür:</td><td>Yox</td></tr>
  </table>
  <p class="note">Oxşar elanlar: 50 000 AZN</p>
  <table class="table1">
    <tr><td class="rowone">Rauf</td></tr>
    <tr><td class="row_phone_number">(050) 123-45-67</td></tr>
    <tr><td>Baxışların sayı:</td><td>1 204</td></tr>
    <tr><td>Yeniləndi:</td><td>17.10.2026</td></tr>
    <tr><td>Elanın nömrəsi:</td><td><a href="/cars/101">101</a></td></tr>
  </table>
</div>
</body>
</html>"#;

/// Index page listing `hrefs`, one `div.cars__item` per link.
pub(crate) fn index_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| {
            format!(r#"<div class="cars__item"><a href="{href}"><img src="/i.jpg"></a></div>"#)
        })
        .collect();
    format!(r#"<html><body><div class="cars">{items}</div><a href="/cars/ad">Ad</a></body></html>"#)
}

/// [`PageFetcher`] backed by a URL → response map. Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    pages: HashMap<String, Result<String, u16>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(ScraperError::UnexpectedStatus {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(ScraperError::UnexpectedStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
