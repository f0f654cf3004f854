// Static stylesheet and client-side script embedded in every report.

pub const REPORT_TITLE: &str = "Profile Analysis - Interactive Report";

pub const STYLES: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
    padding: 20px;
}
.container {
    max-width: 1400px;
    margin: 0 auto;
    background: white;
    border-radius: 20px;
    box-shadow: 0 20px 60px rgba(0,0,0,0.1);
    overflow: hidden;
}
.header {
    background: linear-gradient(135deg, #0077b5, #005885);
    color: white;
    padding: 30px;
    text-align: center;
}
.score-display {
    font-size: 4em;
    font-weight: bold;
    margin: 20px 0;
    text-shadow: 2px 2px 4px rgba(0,0,0,0.3);
}
.score-excellent { color: #00ff88; }
.score-good { color: #ffeb3b; }
.score-poor { color: #ff6b6b; }
.feedback { font-size: 1.1em; margin-top: 10px; opacity: 0.95; }
.stats-row { display: flex; justify-content: space-around; margin: 20px 0; flex-wrap: wrap; }
.stat-item { text-align: center; padding: 10px; }
.stat-number { font-size: 2em; font-weight: bold; display: block; }
.stat-number.red { color: #ff6b6b; }
.stat-number.yellow { color: #ffd93d; }
.stat-number.green { color: #6bcf7f; }
.stat-number.total { color: #4fc3f7; }
.stat-label { font-size: 0.9em; opacity: 0.9; }
.instruction-banner {
    background: linear-gradient(135deg, #4CAF50, #45a049);
    color: white;
    padding: 15px;
    text-align: center;
    font-size: 16px;
    font-weight: 500;
}
.image-container { position: relative; width: 100%; margin: 0 auto; background: #f8f9fa; padding: 20px; }
.profile-image { width: 100%; height: auto; display: block; border-radius: 10px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); }
.info-button {
    position: absolute;
    width: 26px;
    height: 26px;
    border-radius: 50%;
    color: white;
    font: bold 14px Arial, sans-serif;
    display: flex;
    align-items: center;
    justify-content: center;
    cursor: pointer;
    z-index: 10;
    transition: all 0.3s ease;
    box-shadow: 0 4px 15px rgba(0,0,0,0.2);
    border: 2px solid white;
}
.info-button:hover { transform: scale(1.3); z-index: 15; }
.info-button.red { background: linear-gradient(135deg, #ff6b6b, #ee5a52); animation: pulse-red 2s infinite; }
.info-button.yellow { background: linear-gradient(135deg, #ffd93d, #ffcd02); animation: pulse-yellow 2s infinite; color: #333; }
.info-button.green { background: linear-gradient(135deg, #6bcf7f, #4caf50); }
@keyframes pulse-red { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.1); } }
@keyframes pulse-yellow { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.05); } }
.tooltip {
    position: absolute;
    background: rgba(0,0,0,0.95);
    color: white;
    border-radius: 15px;
    width: 400px;
    max-height: 500px;
    display: none;
    z-index: 1000;
    box-shadow: 0 15px 40px rgba(0,0,0,0.4);
    font-size: 14px;
    line-height: 1.6;
}
.tooltip.show { display: flex; flex-direction: column; }
.tooltip-header { padding: 20px 20px 10px 20px; border-bottom: 1px solid rgba(255,255,255,0.1); }
.tooltip-title { font-size: 18px; font-weight: bold; color: #4fc3f7; margin-bottom: 8px; }
.tooltip-meta { display: flex; justify-content: space-between; font-size: 13px; opacity: 0.85; }
.tooltip-content { padding: 0 20px 20px 20px; overflow-y: auto; }
.tooltip-section { margin-top: 15px; }
.tooltip-section h4 { color: #ffd93d; font-size: 14px; margin-bottom: 6px; }
.tooltip-section ul { padding-left: 18px; }
.tooltip-section li { margin-bottom: 4px; }
.scroll-indicator { text-align: center; font-size: 11px; opacity: 0.5; padding: 6px; }
.summary-section { padding: 40px; background: #f8f9fa; }
.summary-section h2 { text-align: center; color: #0077b5; margin-bottom: 30px; }
.summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 25px; }
.summary-card { background: white; padding: 25px; border-radius: 15px; box-shadow: 0 5px 20px rgba(0,0,0,0.1); border-left: 5px solid #0077b5; }
.summary-card.issues { border-left-color: #ff6b6b; }
.summary-card.strengths { border-left-color: #6bcf7f; }
.summary-card.actions { border-left-color: #4CAF50; }
.summary-card.missing { border-left-color: #ff9800; }
.summary-card h3 { color: #0077b5; margin-bottom: 15px; font-size: 1.2em; }
.summary-card ul { list-style: none; padding: 0; }
.summary-card li { margin-bottom: 12px; padding: 8px 0; border-bottom: 1px solid #eee; color: #666; }
.summary-card li:last-child { border-bottom: none; }
.priority-indicator { display: inline-block; width: 8px; height: 8px; border-radius: 50%; margin-right: 10px; }
.priority-high { background: #ff6b6b; }
.priority-medium { background: #ffd93d; }
.priority-low { background: #6bcf7f; }
.footer { text-align: center; font-size: 12px; color: #999; padding: 15px; }
@media (max-width: 768px) {
    .container { margin: 10px; border-radius: 10px; }
    .header { padding: 20px; }
    .score-display { font-size: 2.5em; }
    .image-container { padding: 10px; }
    .info-button { width: 22px; height: 22px; font-size: 12px; }
    .tooltip { width: 320px; max-height: 400px; font-size: 13px; }
    .summary-section { padding: 20px; }
}
"#;

/// Marker/panel behaviour: one panel open at a time, positioned next to its
/// marker and kept inside the viewport; outside clicks and resizes close all.
pub const SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', function () {
    const container = document.querySelector('.image-container');
    const buttons = document.querySelectorAll('.info-button');
    const tooltips = document.querySelectorAll('.tooltip');
    const PANEL_GAP = 15;

    function closeAll() {
        tooltips.forEach(t => t.classList.remove('show'));
        buttons.forEach(b => { b.style.transform = 'scale(1)'; });
    }

    function positionTooltip(button, tooltip) {
        const rect = button.getBoundingClientRect();
        const box = container.getBoundingClientRect();
        const width = tooltip.offsetWidth || 400;
        const height = tooltip.offsetHeight || 300;

        let left = rect.right - box.left + PANEL_GAP;
        let top = rect.top - box.top - 20;

        if (rect.right + PANEL_GAP + width > window.innerWidth) {
            left = rect.left - box.left - width - PANEL_GAP;
        }
        if (left + box.left < 0) {
            left = -box.left + PANEL_GAP;
        }
        if (rect.top - 20 + height > window.innerHeight) {
            top = rect.bottom - box.top - height;
        }
        if (top + box.top < 0) {
            top = -box.top + PANEL_GAP;
        }

        tooltip.style.left = left + 'px';
        tooltip.style.top = top + 'px';
    }

    buttons.forEach(button => {
        const tooltip = document.getElementById(button.getAttribute('data-tooltip-id'));
        if (!tooltip) { return; }

        button.addEventListener('click', function (e) {
            e.stopPropagation();
            const wasOpen = tooltip.classList.contains('show');
            closeAll();
            if (!wasOpen) {
                tooltip.classList.add('show');
                positionTooltip(button, tooltip);
                button.style.transform = 'scale(1.2)';
            }
        });
    });

    tooltips.forEach(t => t.addEventListener('click', e => e.stopPropagation()));

    document.addEventListener('click', function (e) {
        if (!e.target.closest('.info-button') && !e.target.closest('.tooltip')) {
            closeAll();
        }
    });

    window.addEventListener('resize', closeAll);
});
"#;
