//! HTML pages

use series::SeriesJson;

/// Landing page
pub fn render_index() -> String {
    r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Sensor statistics</title></head>
<body>
<h1>Sensor statistics</h1>
<p><a href="/graph">Graph</a> | <a href="/graph/data">Series data (JSON)</a></p>
</body>
</html>
"#
    .to_string()
}

/// Chart page with the four series embedded as JSON arrays
pub fn render_graph(series: &SeriesJson) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Sensor graph</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
<canvas id="graph"></canvas>
<script>
const labels = {labels};
const temperature = {temperature};
const humidity = {humidity};
const pressure = {pressure};
new Chart(document.getElementById("graph"), {{
  type: "line",
  data: {{
    labels: labels,
    datasets: [
      {{ label: "Temperature", data: temperature }},
      {{ label: "Humidity", data: humidity }},
      {{ label: "Pressure (bar)", data: pressure }}
    ]
  }}
}});
</script>
</body>
</html>
"#,
        labels = series.labels,
        temperature = series.temperature,
        humidity = series.humidity,
        pressure = series.pressure,
    )
}
