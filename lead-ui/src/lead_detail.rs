use crate::app::use_client;
use lead_core::cache::QueryState;
use lead_core::lead::{format_timestamp, parse_lead_id, Lead};
use leptos::*;
use leptos_router::{use_params_map, Redirect, A};
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn LeadDetail() -> impl IntoView {
    let params = use_params_map();
    let raw_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    view! {
      {move || match parse_lead_id(&raw_id()) {
          None => view! { <Redirect path="/dashboard"/> }.into_view(),
          Some(id) => view! { <LeadView id/> }.into_view(),
      }}
    }
}

#[component]
fn LeadView(id: i64) -> impl IntoView {
    let client = use_client();
    let state = create_rw_signal(QueryState::<Option<Lead>>::Loading);

    spawn_local(async move {
        state.set(QueryState::from_result(client.lead(id).await));
    });

    view! {
      {move || match state.get() {
          QueryState::Idle | QueryState::Loading => view! {
            <div class="panel">
              <div class="skeleton wide"></div>
              <div class="skeleton"></div>
              <div class="skeleton"></div>
            </div>
          }
          .into_view(),
          QueryState::Error(_) | QueryState::Success(None) => view! {
            <div class="panel center">
              <h2>"Lead Not Found"</h2>
              <p class="meta">
                "The lead you're looking for doesn't exist or may have been removed."
              </p>
              <div class="row">
                <A href="/dashboard">"Back to Dashboard"</A>
                <A href="/">"Register New Lead"</A>
              </div>
            </div>
          }
          .into_view(),
          QueryState::Success(Some(lead)) => lead_card(lead),
      }}
    }
}

fn lead_card(lead: Lead) -> View {
    let email_link = format!("mailto:{}", lead.email);
    let tel_link = format!("tel:{}", lead.mobile);

    view! {
      <div class="panel">
        <A href="/dashboard" class="meta">"Back to Dashboard"</A>
        <h2>{lead.name.clone()}</h2>
        <p class="meta">{format!("Lead ID: {}", lead.id)}</p>

        <dl class="detail-grid">
          <div>
            <dt>"Email Address"</dt>
            <dd><a href=email_link.clone()>{lead.email.clone()}</a></dd>
          </div>
          <div>
            <dt>"Mobile Number"</dt>
            <dd><a href=tel_link.clone()>{lead.mobile.clone()}</a></dd>
          </div>
          <div>
            <dt>"Postcode"</dt>
            <dd>{lead.postcode.clone()}</dd>
          </div>
          <div>
            <dt>"Services of Interest"</dt>
            <dd>
              {lead
                  .services
                  .iter()
                  .map(|tag| view! { <span class="badge">{tag.label()}</span> })
                  .collect_view()}
            </dd>
          </div>
          <div>
            <dt>"Created"</dt>
            <dd>{format_timestamp(&lead.created_at)}</dd>
          </div>
          <div>
            <dt>"Last Updated"</dt>
            <dd>{format_timestamp(&lead.updated_at)}</dd>
          </div>
        </dl>

        <div class="row">
          <a class="action" href=email_link>"Send Email"</a>
          <a class="action" href=tel_link>"Call Now"</a>
        </div>
      </div>
    }
    .into_view()
}
