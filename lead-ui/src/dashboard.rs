use crate::app::use_client;
use lead_core::cache::QueryState;
use lead_core::lead::{format_timestamp, Lead};
use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn Dashboard() -> impl IntoView {
    let client = use_client();
    let leads = create_rw_signal(QueryState::<Vec<Lead>>::Idle);

    let load = move |refetch: bool| {
        let client = client.clone();
        leads.set(QueryState::Loading);
        spawn_local(async move {
            let result = if refetch {
                client.refetch_leads().await
            } else {
                client.leads().await
            };
            leads.set(QueryState::from_result(result));
        });
    };

    load(false);

    view! {
      <div class="panel">
        <div class="row spread">
          <h2>"Leads"</h2>
          <button on:click=move |_| load(true)>"Refresh"</button>
        </div>

        {move || match leads.get() {
            QueryState::Idle | QueryState::Loading => view! {
              <ul class="leads">
                <li class="skeleton"></li>
                <li class="skeleton"></li>
                <li class="skeleton"></li>
              </ul>
            }
            .into_view(),
            QueryState::Error(_) => view! {
              <p class="error">"Could not load leads. Please try again."</p>
            }
            .into_view(),
            QueryState::Success(list) if list.is_empty() => view! {
              <p class="meta">"No leads yet."</p>
            }
            .into_view(),
            QueryState::Success(list) => view! {
              <ul class="leads">
                {list
                    .into_iter()
                    .map(|lead| {
                        let services = lead
                            .services
                            .iter()
                            .map(|tag| tag.label())
                            .collect::<Vec<_>>()
                            .join(", ");
                        view! {
                          <li>
                            <A href=format!("/lead/{}", lead.id)>
                              <div><b>{lead.name.clone()}</b></div>
                              <div>{lead.email.clone()}</div>
                              <div class="meta">
                                {format!(
                                    "{} · registered {}",
                                    services,
                                    format_timestamp(&lead.created_at),
                                )}
                              </div>
                            </A>
                          </li>
                        }
                    })
                    .collect_view()}
              </ul>
            }
            .into_view(),
        }}
      </div>
    }
}
