use crate::dashboard::Dashboard;
use crate::fetch::FetchTransport;
use crate::lead_detail::LeadDetail;
use crate::register::RegistrationForm;
use lead_core::client::{ClientConfig, LeadClient};
use leptos::*;
use leptos_router::{Route, Router, Routes, A};
use std::rc::Rc;

pub type AppClient = Rc<LeadClient<FetchTransport>>;

pub fn use_client() -> AppClient {
    expect_context::<AppClient>()
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_env();
    let client: AppClient = Rc::new(LeadClient::new(FetchTransport::new(config.endpoint)));
    provide_context(client);

    view! {
      <Router>
        <nav class="topbar">
          <A href="/" class="brand">"Brighte Eats"</A>
          <div class="links">
            <A href="/">"Register"</A>
            <A href="/dashboard">"Dashboard"</A>
          </div>
        </nav>
        <main class="content">
          <Routes>
            <Route path="/" view=RegistrationForm/>
            <Route path="/dashboard" view=Dashboard/>
            <Route path="/lead/:id" view=LeadDetail/>
          </Routes>
        </main>
      </Router>
    }
}
