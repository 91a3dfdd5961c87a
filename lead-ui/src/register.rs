use crate::app::use_client;
use lead_core::lead::ServiceTag;
use lead_core::registration::{validate, FieldErrors, RegistrationDraft};
use leptos::*;
use std::collections::BTreeSet;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn RegistrationForm() -> impl IntoView {
    let client = use_client();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let mobile = create_rw_signal(String::new());
    let postcode = create_rw_signal(String::new());
    let services = create_rw_signal(BTreeSet::<ServiceTag>::new());

    let errors = create_rw_signal(FieldErrors::default());
    let submitting = create_rw_signal(false);
    let succeeded = create_rw_signal(false);
    let failed = create_rw_signal(false);

    let submit = move || {
        if submitting.get_untracked() {
            return;
        }
        succeeded.set(false);
        failed.set(false);

        let draft = RegistrationDraft {
            name: name.get_untracked(),
            email: email.get_untracked(),
            mobile: mobile.get_untracked(),
            postcode: postcode.get_untracked(),
            services: services.get_untracked(),
        };

        match validate(&draft) {
            Err(field_errors) => errors.set(field_errors),
            Ok(input) => {
                errors.set(FieldErrors::default());
                submitting.set(true);
                let client = client.clone();
                spawn_local(async move {
                    match client.register(&input).await {
                        Ok(_) => {
                            name.set(String::new());
                            email.set(String::new());
                            mobile.set(String::new());
                            postcode.set(String::new());
                            services.set(BTreeSet::new());
                            succeeded.set(true);
                        }
                        Err(err) => {
                            logging::error!("registration failed: {err}");
                            failed.set(true);
                        }
                    }
                    submitting.set(false);
                });
            }
        }
    };

    view! {
      <div class="panel form-panel">
        <h2>"Register for Brighte Eats"</h2>

        <Show when=move || succeeded.get() fallback=|| ()>
          <div class="banner ok">"Registration successful!"</div>
        </Show>
        <Show when=move || failed.get() fallback=|| ()>
          <div class="banner error">"Registration failed. Please try again."</div>
        </Show>

        <form on:submit=move |ev| {
            ev.prevent_default();
            submit();
        }>
          <div class="field">
            <label>"Name"</label>
            <input
              prop:value=move || name.get()
              on:input=move |ev| name.set(event_target_value(&ev))
            />
            {move || errors.get().name.map(|msg| view! { <span class="field-error">{msg}</span> })}
          </div>

          <div class="field">
            <label>"Email"</label>
            <input
              type="email"
              prop:value=move || email.get()
              on:input=move |ev| email.set(event_target_value(&ev))
            />
            {move || errors.get().email.map(|msg| view! { <span class="field-error">{msg}</span> })}
          </div>

          <div class="field">
            <label>"Mobile"</label>
            <input
              prop:value=move || mobile.get()
              on:input=move |ev| mobile.set(event_target_value(&ev))
            />
            {move || errors.get().mobile.map(|msg| view! { <span class="field-error">{msg}</span> })}
          </div>

          <div class="field">
            <label>"Postcode"</label>
            <input
              prop:value=move || postcode.get()
              on:input=move |ev| postcode.set(event_target_value(&ev))
            />
            {move || errors.get().postcode.map(|msg| view! { <span class="field-error">{msg}</span> })}
          </div>

          <div class="field">
            <label>"Services of Interest"</label>
            {ServiceTag::ALL
                .iter()
                .copied()
                .map(|tag| {
                    view! {
                      <label class="check">
                        <input
                          type="checkbox"
                          prop:checked=move || services.get().contains(&tag)
                          on:change=move |ev| {
                              let selected = event_target_checked(&ev);
                              services.update(|set| {
                                  if selected {
                                      set.insert(tag);
                                  } else {
                                      set.remove(&tag);
                                  }
                              });
                          }
                        />
                        {tag.label()}
                      </label>
                    }
                })
                .collect_view()}
            {move || errors.get().services.map(|msg| view! { <span class="field-error">{msg}</span> })}
          </div>

          <button type="submit" disabled=move || submitting.get()>
            {move || if submitting.get() { "Registering…" } else { "Register" }}
          </button>
        </form>
      </div>
    }
}
