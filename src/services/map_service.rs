use crate::models::location::PlaceLocation;
use crate::services::image_service::PLACEHOLDER_IMAGE_URL;

const MAP_ZOOM: u8 = 10;
const MARKER_ICON_URL: &str = "https://maps.google.com/mapfiles/ms/icons/red-dot.png";
const OPENLAYERS_SCRIPT_URL: &str = "https://unpkg.com/ol@latest/dist/ol.js";
const OPENLAYERS_STYLE_URL: &str = "https://unpkg.com/ol@latest/dist/ol.css";

/// Renders a standalone OpenLayers page with one marker per location,
/// centred on the first one. Returns `None` when there is nothing to plot.
///
/// Hovering a marker shows the place name and image; right-clicking opens
/// its Wikipedia article.
pub fn render_map_page(locations: &[PlaceLocation]) -> Option<String> {
    let center = locations.first()?;
    let places = script_safe_json(locations)?;

    Some(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Route Map</title>
    <style>#map {{ width: 100%; height: 500px; }}</style>
    <script src="{script_url}"></script>
    <link rel="stylesheet" href="{style_url}" />
</head>
<body>
    <div id="map"></div>
    <script>
        var map = new ol.Map({{
            target: 'map',
            layers: [
                new ol.layer.Tile({{
                    source: new ol.source.OSM()
                }})
            ],
            view: new ol.View({{
                center: ol.proj.fromLonLat([{center_lon}, {center_lat}]),
                zoom: {zoom}
            }})
        }});

        var places = {places};
        var markers = [];
        var overlayElement = document.createElement('div');
        overlayElement.style.background = "white";
        overlayElement.style.padding = "10px";
        overlayElement.style.borderRadius = "5px";
        overlayElement.style.boxShadow = "0px 0px 5px rgba(0, 0, 0, 0.5)";
        overlayElement.style.display = "none";

        var overlay = new ol.Overlay({{
            element: overlayElement,
            positioning: 'bottom-center',
            offset: [0, -10]
        }});
        map.addOverlay(overlay);

        places.forEach(function(place) {{
            var marker = new ol.Feature({{
                geometry: new ol.geom.Point(ol.proj.fromLonLat([place.lon, place.lat])),
                name: place.name,
                wikipedia_url: "https://en.wikipedia.org/wiki/" + encodeURIComponent(place.name.replace(/ /g, '_')),
                image_url: place.image_url || '{placeholder}'
            }});

            marker.setStyle(new ol.style.Style({{
                image: new ol.style.Icon({{
                    src: '{marker_url}',
                    scale: 1
                }})
            }}));
            markers.push(marker);
        }});

        map.addLayer(new ol.layer.Vector({{
            source: new ol.source.Vector({{
                features: markers
            }})
        }}));

        map.on('pointermove', function(event) {{
            var feature = map.forEachFeatureAtPixel(event.pixel, function(feature) {{
                return feature;
            }});

            if (feature) {{
                overlayElement.replaceChildren();
                var title = document.createElement('b');
                title.textContent = feature.get('name');
                var image = document.createElement('img');
                image.src = feature.get('image_url');
                image.width = 150;
                image.height = 100;
                overlayElement.append(title, document.createElement('br'), image);
                overlay.setPosition(event.coordinate);
                overlayElement.style.display = "block";
            }} else {{
                overlay.setPosition(undefined);
                overlayElement.style.display = "none";
            }}
        }});

        map.on('contextmenu', function(event) {{
            var feature = map.forEachFeatureAtPixel(event.pixel, function(feature) {{
                return feature;
            }});

            if (feature) {{
                event.preventDefault();
                window.open(feature.get('wikipedia_url'), '_blank');
            }}
        }});
    </script>
</body>
</html>
"#,
        script_url = OPENLAYERS_SCRIPT_URL,
        style_url = OPENLAYERS_STYLE_URL,
        center_lon = center.lon,
        center_lat = center.lat,
        zoom = MAP_ZOOM,
        places = places,
        placeholder = PLACEHOLDER_IMAGE_URL,
        marker_url = MARKER_ICON_URL,
    ))
}

// JSON is valid JavaScript, but a name containing `</script>` would still
// close the element early.
fn script_safe_json(locations: &[PlaceLocation]) -> Option<String> {
    let json = serde_json::to_string(locations).ok()?;
    Some(
        json.replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"),
    )
}
