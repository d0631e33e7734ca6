use crate::page::{BAD_HABIT, CTA_BUTTON, CTA_MESSAGE, GOOD_HABIT, OPEN_CLASS};

pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{CTA_BUTTON}}", CTA_BUTTON)
        .replace("{{CTA_MESSAGE}}", CTA_MESSAGE)
        .replace("{{OPEN}}", OPEN_CLASS)
        .replace("{{GOOD_ADD}}", GOOD_HABIT.add)
        .replace("{{GOOD_MODAL}}", GOOD_HABIT.modal)
        .replace("{{GOOD_INPUT}}", GOOD_HABIT.input)
        .replace("{{GOOD_SAVE}}", GOOD_HABIT.save)
        .replace("{{GOOD_CLOSE}}", GOOD_HABIT.close)
        .replace("{{BAD_ADD}}", BAD_HABIT.add)
        .replace("{{BAD_MODAL}}", BAD_HABIT.modal)
        .replace("{{BAD_INPUT}}", BAD_HABIT.input)
        .replace("{{BAD_SAVE}}", BAD_HABIT.save)
        .replace("{{BAD_CLOSE}}", BAD_HABIT.close)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --good: #3f8f5b;
      --bad: #c2483a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: var(--accent-2);
    }

    .btn-good {
      background: var(--good);
    }

    .btn-bad {
      background: var(--bad);
    }

    .modal {
      display: none;
      position: fixed;
      inset: 0;
      background: rgba(43, 42, 40, 0.45);
      place-items: center;
    }

    .modal.{{OPEN}} {
      display: grid;
    }

    .modal-card {
      background: white;
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 12px;
      width: min(380px, 90vw);
    }

    .modal-card input {
      padding: 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.25);
      font-size: 1rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Tracker</h1>
      <p>Build the good ones, break the bad ones.</p>
    </header>

    <button id="{{CTA_BUTTON}}" type="button">Get started</button>

    <section class="actions">
      <button id="{{GOOD_ADD}}" class="btn-good" type="button">Add good habit</button>
      <button id="{{BAD_ADD}}" class="btn-bad" type="button">Add bad habit</button>
    </section>
  </main>

  <div class="modal" id="{{GOOD_MODAL}}">
    <div class="modal-card">
      <h2>New good habit</h2>
      <input id="{{GOOD_INPUT}}" type="text" placeholder="Habit name" />
      <button id="{{GOOD_SAVE}}" class="btn-good" type="button">Save</button>
      <button id="{{GOOD_CLOSE}}" type="button">Close</button>
    </div>
  </div>

  <div class="modal" id="{{BAD_MODAL}}">
    <div class="modal-card">
      <h2>New bad habit</h2>
      <input id="{{BAD_INPUT}}" type="text" placeholder="Habit name" />
      <button id="{{BAD_SAVE}}" class="btn-bad" type="button">Save</button>
      <button id="{{BAD_CLOSE}}" type="button">Close</button>
    </div>
  </div>

  <script>
    document.addEventListener('DOMContentLoaded', () => {
      const byId = (id) => document.getElementById(id);

      const cta = byId('{{CTA_BUTTON}}');
      if (cta) {
        cta.addEventListener('click', () => alert('{{CTA_MESSAGE}}'));
      }

      const bindHabit = (kind, ids) => {
        const modal = byId(ids.modal);
        const setOpen = (open) => {
          if (modal) {
            modal.classList.toggle('{{OPEN}}', open);
          }
        };

        const add = byId(ids.add);
        if (add) {
          add.addEventListener('click', () => setOpen(true));
        }

        const close = byId(ids.close);
        if (close) {
          close.addEventListener('click', () => setOpen(false));
        }

        const save = byId(ids.save);
        if (save) {
          save.addEventListener('click', () => {
            const input = byId(ids.input);
            const habitName = input ? input.value : '';
            if (!habitName) {
              return;
            }

            const path = kind === 'bad' ? '/addHabit?type=bad' : '/addHabit';
            fetch(path, {
              method: 'POST',
              headers: { 'content-type': 'application/json' },
              body: JSON.stringify({ habit_name: habitName })
            })
              .then((res) => {
                if (!res.ok) {
                  throw new Error(`status ${res.status}`);
                }
                return res.json();
              })
              .then((data) => console.log(data.habit_name))
              .catch((err) => console.error(err));

            setOpen(false);
          });
        }
      };

      bindHabit('good', {
        add: '{{GOOD_ADD}}',
        modal: '{{GOOD_MODAL}}',
        input: '{{GOOD_INPUT}}',
        save: '{{GOOD_SAVE}}',
        close: '{{GOOD_CLOSE}}'
      });
      bindHabit('bad', {
        add: '{{BAD_ADD}}',
        modal: '{{BAD_MODAL}}',
        input: '{{BAD_INPUT}}',
        save: '{{BAD_SAVE}}',
        close: '{{BAD_CLOSE}}'
      });
    });
  </script>
</body>
</html>
"#;
