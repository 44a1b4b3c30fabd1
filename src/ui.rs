use crate::client::format::format_elapsed;

/// The tracker page: timer widgets in their idle state, the two lists
/// pre-rendered on the server, and the script that drives them.
pub fn render_index(timeline: &str, analytics: &str) -> String {
    INDEX_HTML
        .replace("{{TIMER}}", &format_elapsed(0))
        .replace("{{TIMELINE}}", timeline)
        .replace("{{ANALYTICS}}", analytics)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Time Tracker</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --accent: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 20px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .timer-display {
      font-size: 3rem;
      font-variant-numeric: tabular-nums;
      color: var(--accent);
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    ul {
      padding-left: 20px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Time Tracker</h1>
    </header>

    <section>
      <div class="timer-display">{{TIMER}}</div>
      <div class="row">
        <input id="projectInput" type="text" placeholder="Project name" />
        <button id="startButton" type="button">Start</button>
        <button id="stopButton" type="button" disabled>Stop</button>
      </div>
    </section>

    <section>
      <h2>Add forgotten entry</h2>
      <div class="row">
        <input id="addProjectInput" type="text" placeholder="Project name" />
        <input id="addStartTimeInput" type="datetime-local" />
        <input id="addEndTimeInput" type="datetime-local" />
        <button id="addEntryButton" type="button">Add entry</button>
      </div>
    </section>

    <section>
      <h2>Today</h2>
      <div id="timelineChart">{{TIMELINE}}</div>
    </section>

    <section>
      <h2>This week</h2>
      <div id="analyticsChart">{{ANALYTICS}}</div>
    </section>
  </main>

  <script>
    const timerDisplay = document.querySelector('.timer-display');
    const projectInput = document.getElementById('projectInput');
    const startButton = document.getElementById('startButton');
    const stopButton = document.getElementById('stopButton');
    const addProjectInput = document.getElementById('addProjectInput');
    const addStartTimeInput = document.getElementById('addStartTimeInput');
    const addEndTimeInput = document.getElementById('addEndTimeInput');
    const addEntryButton = document.getElementById('addEntryButton');
    const timelineChart = document.getElementById('timelineChart');
    const analyticsChart = document.getElementById('analyticsChart');

    // idle | starting | running | stopping
    const timer = { state: 'idle', startedAt: null, ticker: null };

    const formatTime = (seconds) => {
      const h = String(Math.floor(seconds / 3600)).padStart(2, '0');
      const m = String(Math.floor((seconds % 3600) / 60)).padStart(2, '0');
      const s = String(seconds % 60).padStart(2, '0');
      return `${h}:${m}:${s}`;
    };

    const escapeHtml = (value) => value
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;')
      .replace(/'/g, '&#39;');

    const setTimerState = (state) => {
      timer.state = state;
      projectInput.disabled = state !== 'idle';
      startButton.disabled = state !== 'idle';
      stopButton.disabled = state !== 'running';
    };

    const tick = () => {
      if (timer.startedAt) {
        timerDisplay.textContent = formatTime(Math.floor((Date.now() - timer.startedAt) / 1000));
      }
    };

    const postJson = async (path, body) => {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const getJson = async (path) => {
      const res = await fetch(path);
      if (!res.ok) {
        throw new Error(`${path} returned ${res.status}`);
      }
      return res.json();
    };

    const loadTimeline = async () => {
      try {
        const entries = await getJson('/api/timeline');
        const now = new Date();
        const today = now.toDateString();
        const items = entries
          .map((entry) => ({
            entry,
            start: new Date(entry.start_time),
            end: entry.end_time ? new Date(entry.end_time) : now
          }))
          .filter(({ start, end }) => !isNaN(start) && !isNaN(end) && start.toDateString() === today)
          .map(({ entry, start, end }) => {
            const hours = ((end - start) / 3600000).toFixed(2);
            return `<li><strong>${escapeHtml(entry.project_name)}</strong>: ${start.toLocaleTimeString()} - ${end.toLocaleTimeString()} (${hours} hours)</li>`;
          });
        if (items.length === 0) {
          timelineChart.textContent = 'No time entries yet for today.';
          return;
        }
        timelineChart.innerHTML = `<ul class="timeline-list">${items.join('')}</ul>`;
      } catch (err) {
        console.error('error loading timeline:', err);
        timelineChart.textContent = 'Failed to load timeline.';
      }
    };

    const loadAnalytics = async () => {
      try {
        const totals = await getJson('/api/analytics');
        const projects = Object.keys(totals);
        if (projects.length === 0) {
          analyticsChart.textContent = 'No analytics data for this week yet.';
          return;
        }
        const items = projects
          .map((project) => `<li>${escapeHtml(project)}: ${Number(totals[project]).toFixed(2)} hours</li>`)
          .join('');
        analyticsChart.innerHTML = `<ul class="analytics-list">${items}</ul>`;
      } catch (err) {
        console.error('error loading analytics:', err);
        analyticsChart.textContent = 'Failed to load analytics.';
      }
    };

    const refresh = () => Promise.all([loadTimeline(), loadAnalytics()]);

    startButton.addEventListener('click', async () => {
      if (timer.state !== 'idle') {
        return;
      }
      const project = projectInput.value.trim();
      if (!project) {
        alert('Please enter a project name.');
        return;
      }

      setTimerState('starting');
      try {
        const data = await postJson('/api/start_timer', { project });
        console.log(data.message);
      } catch (err) {
        console.error('error starting timer:', err);
        setTimerState('idle');
        alert('Failed to start timer.');
        return;
      }

      timer.startedAt = Date.now();
      timer.ticker = setInterval(tick, 1000);
      setTimerState('running');
      refresh();
    });

    stopButton.addEventListener('click', async () => {
      if (timer.state !== 'running') {
        return;
      }

      setTimerState('stopping');
      try {
        const data = await postJson('/api/stop_timer');
        console.log(data.message);
      } catch (err) {
        console.error('error stopping timer:', err);
        setTimerState('running');
        alert('Failed to stop timer.');
        return;
      }

      clearInterval(timer.ticker);
      timer.ticker = null;
      timer.startedAt = null;
      timerDisplay.textContent = formatTime(0);
      projectInput.value = '';
      setTimerState('idle');
      refresh();
    });

    addEntryButton.addEventListener('click', async () => {
      const project = addProjectInput.value.trim();
      const start_time = addStartTimeInput.value;
      const end_time = addEndTimeInput.value;
      if (!project || !start_time.trim() || !end_time.trim()) {
        alert('Please fill in all fields for the forgotten entry.');
        return;
      }

      try {
        const data = await postJson('/api/add_entry', { project, start_time, end_time });
        console.log(data.message);
      } catch (err) {
        console.error('error adding entry:', err);
        alert('Failed to add entry.');
        return;
      }

      alert('Entry added successfully!');
      addProjectInput.value = '';
      addStartTimeInput.value = '';
      addEndTimeInput.value = '';
      refresh();
    });

    setTimerState('idle');
    refresh();
  </script>
</body>
</html>
"#;
