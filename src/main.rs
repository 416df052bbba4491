/// 可执行文件入口（用于测试和调试）：跑一整局全电脑对局

use xqmj_engine::{GameEngine, GamePhase, Intent};

fn main() {
    println!("象棋麻将引擎测试");

    let mut engine = match GameEngine::new_singleplayer(4, "观战者") {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("建局失败: {:?}", err);
            return;
        }
    };
    // 座位 0 也交给电脑，整局自动推进
    engine.state.players[0].is_human = false;

    if let Err(err) = engine.apply_intent(0, Intent::StartGame) {
        eprintln!("开局失败: {:?}", err);
        return;
    }

    let mut ticks = 0u32;
    while engine.state.phase != GamePhase::GameOver && ticks < 5000 {
        engine.tick();
        ticks += 1;
    }

    println!("对局结束（{} tick）", ticks);
    println!();
    println!("事件日志：");
    for line in &engine.state.logs {
        println!("  {}", line);
    }
    println!();
    for player in &engine.state.players {
        println!("{}：{} 元", player.name, player.chips);
    }
}
